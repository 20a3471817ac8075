//! Configuration management for Pure Rust ID3.
//!
//! This module provides the validated tree configuration consumed by the
//! engine and the experiment configuration consumed by the runner. Both can
//! be loaded from TOML or JSON files.

pub mod core;
pub mod experiment;

// Re-export commonly used configuration types
pub use self::core::{TreeConfig, TreeConfigBuilder};
pub use self::experiment::{DataConfig, DataSource, EvaluationConfig, ExperimentConfig};

/// Default experiment file name
pub const DEFAULT_CONFIG_FILE: &str = "id3.toml";
