//! System constants and configuration defaults for Pure Rust ID3.

/// Default minimum entropy a node must carry to be split further.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Default name of the label column.
pub const DEFAULT_TARGET_COLUMN: &str = "label";

/// Default maximum tree depth (root = 1).
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// A candidate feature replaces the current best only when its information
/// gain is larger by more than this amount, so float noise cannot reorder
/// features with mathematically equal gain.
pub const GAIN_TOLERANCE: f64 = 1e-12;

/// Default random seed for shuffling and splitting.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Default number of cross-validation folds.
pub const DEFAULT_NUM_FOLDS: usize = 5;

/// Default fraction of rows kept for training in a holdout split.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Default number of holdout repeats.
pub const DEFAULT_TRAIN_REPEATS: usize = 1;

/// Library version string.
pub const ID3_RUST_VERSION: &str = env!("CARGO_PKG_VERSION");
