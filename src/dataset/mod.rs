//! Dataset management module for Pure Rust ID3.
//!
//! This module provides the in-memory categorical table consumed by the tree
//! engine, row-subset views, categorical encoding of raw string data, CSV
//! loading and writing, and holdout / k-fold row partitioning.

pub mod dataset;
pub mod encoding;
pub mod loader;
pub mod partition;

// Re-export commonly used types
pub use dataset::{Dataset, Subset};
pub use encoding::CategoryEncoder;
pub use loader::{CsvLoader, DataLoader, LoadedData, LoaderConfig};
pub use partition::{train_test_split, train_test_split_dataset, KFold, RowSplit};
