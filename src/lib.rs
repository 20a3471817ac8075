//! # Pure Rust ID3
//!
//! An ID3 decision tree for purely categorical tabular data. Trees are grown
//! by information gain and queried without recursion, using an explicit work
//! stack of `(node, rows)` items.
//!
//! ## Features
//!
//! - **Iterative Engine**: Training and prediction walk the tree over a heap
//!   allocated [`WorkStack`], so tree depth never touches the call stack.
//! - **Value-Keyed Children**: Every child remembers the split value it was
//!   trained on. Rows whose value never reached a node during training are
//!   reported as an error or routed to the node's majority class, depending
//!   on [`UnseenCategoryPolicy`].
//! - **Deterministic Ties**: Equal gains go to the earliest feature column and
//!   equal label counts go to the smallest category code.
//! - **Data Pipeline**: Raw delimited files are encoded into sorted category
//!   codes with one shared [`CategoryEncoder`], and can be persisted as
//!   encoded CSV files.
//! - **Evaluation**: Repeated holdout and k-fold cross-validation, with folds
//!   trained in parallel using Rayon.
//!
//! ## Quick Start
//!
//! ```rust
//! use id3_rust::{accuracy, Dataset, DecisionTree};
//!
//! # fn main() -> id3_rust::Result<()> {
//! let dataset = Dataset::from_rows(
//!     vec!["label", "outlook", "windy"],
//!     &[
//!         vec![0, 0, 0],
//!         vec![0, 0, 1],
//!         vec![1, 1, 0],
//!         vec![1, 2, 0],
//!         vec![0, 2, 1],
//!     ],
//! )?;
//!
//! let mut tree = DecisionTree::with_params(3, "label")?;
//! tree.train(&dataset, 0.01)?;
//!
//! let (predictions, ground_truth) = tree.predict(&dataset)?;
//! assert_eq!(accuracy(&predictions, &ground_truth)?, 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Error type, type aliases, constants and logging setup
//! - [`dataset`]: Categorical tables, row subsets, encoding, CSV I/O and row splitting
//! - [`config`]: Tree and experiment configuration from TOML or JSON files
//! - [`tree`]: Information gain, tree nodes and the decision tree engine
//! - [`metrics_eval`]: Accuracy and score summaries
//! - [`cross_validation`]: Repeated holdout and k-fold evaluation
//! - [`experiment`]: Config-driven experiment runner

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Dataset management module
pub mod dataset;

// Tree construction and traversal module
pub mod tree;

// Metrics evaluation module
pub mod metrics_eval;

// Model evaluation module
pub mod cross_validation;

// Experiment runner module
pub mod experiment;

// Re-export core functionality for convenience
pub use self::core::{
    constants::*,
    error::{Id3Error, Result},
    types::*,
};

// Re-export configuration functionality
pub use config::{
    DataConfig, DataSource, EvaluationConfig, ExperimentConfig, TreeConfig, TreeConfigBuilder,
};

// Re-export dataset functionality
pub use dataset::{
    train_test_split, train_test_split_dataset, CategoryEncoder, CsvLoader, DataLoader, Dataset,
    KFold, LoadedData, LoaderConfig, RowSplit, Subset,
};

// Re-export tree functionality
pub use tree::{
    Branch, DecisionTree, InformationGain, PredictionOutput, TreeNode, WorkStack,
};

// Re-export metrics evaluation functionality
pub use metrics_eval::{accuracy, mean, std_dev, ScoreSummary};

// Re-export evaluation functionality
pub use cross_validation::{
    cross_validate, repeated_holdout, CrossValidationConfig, CrossValidationResult, FoldScore,
    HoldoutResult, TrialScore,
};

// Re-export experiment functionality
pub use experiment::{load_data, run_experiment, EvaluationOutcome, ExperimentReport};

// Version information
pub use self::core::constants::ID3_RUST_VERSION as VERSION;

/// Initialize the library.
///
/// Installs the `env_logger` backend for the `log` facade, honoring
/// `RUST_LOG` and defaulting to `info`. Repeated calls are harmless.
///
/// # Examples
///
/// ```rust
/// fn main() -> id3_rust::Result<()> {
///     id3_rust::init()?;
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    core::is_core_initialized()
}
