//! Data loading for Pure Rust ID3.
//!
//! Two on-disk layouts are supported:
//!
//! - **raw** files: header-less delimited text whose first field is the
//!   target and whose remaining fields follow the configured feature names,
//!   with categories written as arbitrary strings;
//! - **encoded** CSV files: a header row of column names followed by integer
//!   category codes, as produced by [`CsvLoader::write_encoded_csv`].

pub mod csv;

pub use self::csv::CsvLoader;

use crate::core::constants::DEFAULT_TARGET_COLUMN;
use crate::core::error::Result;
use crate::dataset::dataset::Dataset;
use crate::dataset::encoding::CategoryEncoder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Data loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Feature column names of raw files, in file order after the target
    pub feature_names: Vec<String>,
    /// Name given to the leading target field of raw files
    pub target_column: String,
    /// Field delimiter
    pub delimiter: char,
    /// Whether raw files start with a header row to skip
    pub raw_has_header: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            feature_names: Vec::new(),
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            delimiter: ',',
            raw_has_header: false,
        }
    }
}

impl LoaderConfig {
    /// Create a loader configuration for the given feature names
    pub fn new<S: Into<String>>(feature_names: Vec<S>) -> Self {
        LoaderConfig {
            feature_names: feature_names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the target column name
    pub fn with_target_column<S: Into<String>>(mut self, target: S) -> Self {
        self.target_column = target.into();
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether raw files start with a header row to skip
    pub fn with_raw_header(mut self, has_header: bool) -> Self {
        self.raw_has_header = has_header;
        self
    }

    /// Column layout of raw files: target first, then the features.
    pub fn raw_columns(&self) -> Vec<String> {
        std::iter::once(self.target_column.clone())
            .chain(self.feature_names.iter().cloned())
            .collect()
    }
}

/// Data loader trait
pub trait DataLoader {
    /// Load data from source
    fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset>;

    /// Get loader configuration
    fn config(&self) -> &LoaderConfig;
}

/// Training data with an optional test set and the encoder that produced
/// their codes.
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Training rows
    pub train: Dataset,
    /// Test rows, when a test file was given
    pub test: Option<Dataset>,
    /// Category dictionaries, present when the data came from raw files
    pub encoder: Option<CategoryEncoder>,
}
