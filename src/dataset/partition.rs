//! Row partitioning utilities for evaluation.
//!
//! Holdout splits and k-fold iteration both work on row indices; the
//! `*_dataset` helpers materialize the resulting parts with
//! [`Dataset::select_rows`].

use crate::core::error::{Id3Error, Result};
use crate::core::types::DataSize;
use crate::dataset::dataset::Dataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Row indices of one train/validation split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSplit {
    /// Rows used for training
    pub train: Vec<DataSize>,
    /// Rows held out for validation
    pub validation: Vec<DataSize>,
}

/// Shuffle the rows and keep `floor(train_fraction * n)` of them for training.
pub fn train_test_split(num_rows: DataSize, train_fraction: f64, seed: u64) -> Result<RowSplit> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(Id3Error::invalid_parameter(
            "train_fraction",
            train_fraction.to_string(),
            "must be in range (0.0, 1.0)",
        ));
    }

    let num_train = (train_fraction * num_rows as f64).floor() as usize;
    if num_train == 0 || num_train == num_rows {
        return Err(Id3Error::invalid_input(format!(
            "a train fraction of {} leaves an empty side when splitting {} rows",
            train_fraction, num_rows
        )));
    }

    let mut rows: Vec<DataSize> = (0..num_rows).collect();
    rows.shuffle(&mut StdRng::seed_from_u64(seed));
    let validation = rows.split_off(num_train);

    Ok(RowSplit {
        train: rows,
        validation,
    })
}

/// Holdout split materialized as two datasets.
pub fn train_test_split_dataset(
    dataset: &Dataset,
    train_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    let split = train_test_split(dataset.num_rows(), train_fraction, seed)?;
    Ok((
        dataset.select_rows(&split.train)?,
        dataset.select_rows(&split.validation)?,
    ))
}

/// K-fold cross-validation iterator configuration.
///
/// Folds have sizes `n / k` or `n / k + 1` (the first `n % k` folds get the
/// extra row); every row appears in exactly one validation fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KFold {
    /// Number of folds
    pub n_folds: usize,
    /// Whether to shuffle rows before cutting folds
    pub shuffle: bool,
    /// Shuffle seed
    pub seed: u64,
}

impl KFold {
    /// Create a shuffled k-fold splitter
    pub fn new(n_folds: usize, seed: u64) -> Self {
        KFold {
            n_folds,
            shuffle: true,
            seed,
        }
    }

    /// Disable or enable shuffling
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Produce one [`RowSplit`] per fold.
    pub fn split(&self, num_rows: DataSize) -> Result<Vec<RowSplit>> {
        if self.n_folds < 2 {
            return Err(Id3Error::invalid_parameter(
                "n_folds",
                self.n_folds.to_string(),
                "must be at least 2",
            ));
        }
        if self.n_folds > num_rows {
            return Err(Id3Error::invalid_input(format!(
                "cannot cut {} folds from {} rows",
                self.n_folds, num_rows
            )));
        }

        let mut rows: Vec<DataSize> = (0..num_rows).collect();
        if self.shuffle {
            rows.shuffle(&mut StdRng::seed_from_u64(self.seed));
        }

        let base = num_rows / self.n_folds;
        let extra = num_rows % self.n_folds;

        let mut splits = Vec::with_capacity(self.n_folds);
        let mut start = 0;
        for fold in 0..self.n_folds {
            let size = base + usize::from(fold < extra);
            let end = start + size;
            let validation = rows[start..end].to_vec();
            let train = rows[..start].iter().chain(&rows[end..]).copied().collect();
            splits.push(RowSplit { train, validation });
            start = end;
        }

        Ok(splits)
    }
}
