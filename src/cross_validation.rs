//! Model evaluation by repeated holdout and k-fold cross-validation.
//!
//! Every trial or fold trains its own [`DecisionTree`]. K-fold runs its folds
//! in parallel with rayon; each fold owns its engine and its row copies and
//! only shares the source dataset read-only.

use crate::config::TreeConfig;
use crate::core::constants::*;
use crate::core::error::{Id3Error, Result};
use crate::dataset::{train_test_split, Dataset, KFold, RowSplit};
use crate::metrics_eval::{accuracy, ScoreSummary};
use crate::tree::DecisionTree;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Cross-validation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationConfig {
    /// Number of folds
    pub num_folds: usize,
    /// Whether to shuffle rows before cutting folds
    pub shuffle: bool,
    /// Random seed for reproducibility
    pub random_seed: u64,
}

impl CrossValidationConfig {
    /// Create a new cross-validation configuration
    pub fn new() -> Self {
        Self {
            num_folds: DEFAULT_NUM_FOLDS,
            shuffle: true,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }

    /// Set the number of folds
    pub fn with_num_folds(mut self, num_folds: usize) -> Self {
        self.num_folds = num_folds;
        self
    }

    /// Set whether to shuffle data
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    fn splitter(&self) -> KFold {
        KFold::new(self.num_folds, self.random_seed).with_shuffle(self.shuffle)
    }
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores of one k-fold fold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldScore {
    /// Fold number, starting at 1
    pub fold: usize,
    /// Accuracy on the fold's training rows
    pub train_accuracy: f64,
    /// Accuracy on the fold's held-out rows
    pub validation_accuracy: f64,
    /// Accuracy on the separate test set, when one was given
    pub test_accuracy: Option<f64>,
    /// Leaves of the fold's tree
    pub num_leaves: usize,
    /// Depth of the fold's tree
    pub depth: usize,
}

/// Cross-validation results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Number of folds used
    pub num_folds: usize,
    /// Per-fold scores in fold order
    pub folds: Vec<FoldScore>,
    /// Training accuracy over folds
    pub train: ScoreSummary,
    /// Validation accuracy over folds
    pub validation: ScoreSummary,
    /// Test accuracy over folds
    pub test: Option<ScoreSummary>,
}

/// Scores of one holdout repeat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialScore {
    /// Trial number, starting at 1
    pub trial: usize,
    /// Accuracy over the complete training dataset
    pub train_accuracy: f64,
    /// Accuracy on the rows held out in this trial
    pub validation_accuracy: f64,
    /// Accuracy on the separate test set, when one was given
    pub test_accuracy: Option<f64>,
}

/// Repeated holdout results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutResult {
    /// Fraction of rows used for fitting
    pub train_fraction: f64,
    /// Per-trial scores in trial order
    pub trials: Vec<TrialScore>,
    /// Training accuracy over trials
    pub train: ScoreSummary,
    /// Validation accuracy over trials
    pub validation: ScoreSummary,
    /// Test accuracy over trials
    pub test: Option<ScoreSummary>,
}

fn score(tree: &DecisionTree, dataset: &Dataset) -> Result<f64> {
    let (predictions, ground_truth) = tree.predict(dataset)?;
    accuracy(&predictions, &ground_truth)
}

fn test_summary(scores: impl Iterator<Item = Option<f64>>) -> Option<ScoreSummary> {
    let scores: Option<Vec<f64>> = scores.collect();
    scores.map(|s| ScoreSummary::from_scores(&s))
}

/// Train on a random `train_fraction` of `dataset` `repeats` times.
///
/// Each trial reshuffles with seed `seed + trial`. Train accuracy is measured
/// over the whole of `dataset`, validation accuracy over the rows left out,
/// and test accuracy over `test` when given.
pub fn repeated_holdout(
    dataset: &Dataset,
    tree_config: &TreeConfig,
    train_fraction: f64,
    repeats: usize,
    seed: u64,
    test: Option<&Dataset>,
) -> Result<HoldoutResult> {
    if repeats < 1 {
        return Err(Id3Error::invalid_parameter(
            "repeats",
            repeats.to_string(),
            "must be at least 1",
        ));
    }

    let mut tree = DecisionTree::new(tree_config.clone())?;
    let mut trials = Vec::with_capacity(repeats);

    for trial in 0..repeats {
        let RowSplit { train, validation } =
            train_test_split(dataset.num_rows(), train_fraction, seed.wrapping_add(trial as u64))?;
        let train_rows = dataset.select_rows(&train)?;
        let validation_rows = dataset.select_rows(&validation)?;

        tree.fit(&train_rows)?;

        let trial_score = TrialScore {
            trial: trial + 1,
            train_accuracy: score(&tree, dataset)?,
            validation_accuracy: score(&tree, &validation_rows)?,
            test_accuracy: test.map(|t| score(&tree, t)).transpose()?,
        };
        info!(
            "Trial #{}: train accuracy {:.3}, validation accuracy {:.3}{}",
            trial_score.trial,
            trial_score.train_accuracy,
            trial_score.validation_accuracy,
            trial_score
                .test_accuracy
                .map(|a| format!(", test accuracy {:.3}", a))
                .unwrap_or_default()
        );
        trials.push(trial_score);
    }

    let train: Vec<f64> = trials.iter().map(|t| t.train_accuracy).collect();
    let validation: Vec<f64> = trials.iter().map(|t| t.validation_accuracy).collect();

    Ok(HoldoutResult {
        train_fraction,
        train: ScoreSummary::from_scores(&train),
        validation: ScoreSummary::from_scores(&validation),
        test: test_summary(trials.iter().map(|t| t.test_accuracy)),
        trials,
    })
}

fn evaluate_fold(
    fold: usize,
    split: &RowSplit,
    dataset: &Dataset,
    tree_config: &TreeConfig,
    test: Option<&Dataset>,
) -> Result<FoldScore> {
    let train_rows = dataset.select_rows(&split.train)?;
    let validation_rows = dataset.select_rows(&split.validation)?;

    let mut tree = DecisionTree::new(tree_config.clone())?;
    tree.fit(&train_rows)?;
    debug!("Fold #{} trained: {}", fold, tree);

    Ok(FoldScore {
        fold,
        train_accuracy: score(&tree, &train_rows)?,
        validation_accuracy: score(&tree, &validation_rows)?,
        test_accuracy: test.map(|t| score(&tree, t)).transpose()?,
        num_leaves: tree.num_leaves(),
        depth: tree.depth(),
    })
}

/// K-fold cross-validation of a tree configuration over `dataset`.
///
/// Folds are trained in parallel. Results come back in fold order and the
/// first failing fold's error is returned.
pub fn cross_validate(
    dataset: &Dataset,
    tree_config: &TreeConfig,
    cv_config: &CrossValidationConfig,
    test: Option<&Dataset>,
) -> Result<CrossValidationResult> {
    tree_config.validate()?;
    let splits = cv_config.splitter().split(dataset.num_rows())?;
    info!(
        "Running {}-fold cross-validation over {} rows",
        splits.len(),
        dataset.num_rows()
    );

    let folds: Vec<FoldScore> = splits
        .par_iter()
        .enumerate()
        .map(|(i, split)| evaluate_fold(i + 1, split, dataset, tree_config, test))
        .collect::<Result<Vec<_>>>()?;

    for fold in &folds {
        info!(
            "Fold #{}: train accuracy {:.3}, validation accuracy {:.3}",
            fold.fold, fold.train_accuracy, fold.validation_accuracy
        );
    }

    let train: Vec<f64> = folds.iter().map(|f| f.train_accuracy).collect();
    let validation: Vec<f64> = folds.iter().map(|f| f.validation_accuracy).collect();

    Ok(CrossValidationResult {
        num_folds: folds.len(),
        train: ScoreSummary::from_scores(&train),
        validation: ScoreSummary::from_scores(&validation),
        test: test_summary(folds.iter().map(|f| f.test_accuracy)),
        folds,
    })
}
