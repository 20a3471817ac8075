//! Error handling and error types for Pure Rust ID3.
//!
//! This module provides the error type shared by the tree engine, the dataset
//! utilities and the experiment runner. Every fallible operation returns
//! [`Result`], and errors propagate to the caller at the point of violation.

use crate::core::types::CategoryValue;
use std::io;
use thiserror::Error;

/// Main error type for the ID3 library.
#[derive(Error, Debug)]
pub enum Id3Error {
    /// Inconsistent engine parameters or an internal structural mismatch
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Prediction requested before the tree was trained
    #[error("Untrained model: {message}")]
    UntrainedModel { message: String },

    /// Entropy or class probabilities requested on zero rows
    #[error("Empty subset: {message}")]
    EmptySubset { message: String },

    /// Missing columns, mismatched feature lists or malformed tables
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A prediction row carries a split value never seen during training
    #[error("Unseen category: feature '{feature}' has value {value} that was not present during training")]
    UnseenCategory {
        feature: String,
        value: CategoryValue,
    },

    /// Invalid configuration parameter value
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Data loading and parsing errors
    #[error("Data loading error: {message}")]
    DataLoading { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

/// Type alias for Results using Id3Error
pub type Result<T> = std::result::Result<T, Id3Error>;

impl Id3Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Id3Error::Config {
            message: message.into(),
        }
    }

    /// Create an untrained model error
    pub fn untrained<S: Into<String>>(message: S) -> Self {
        Id3Error::UntrainedModel {
            message: message.into(),
        }
    }

    /// Create an empty subset error
    pub fn empty_subset<S: Into<String>>(message: S) -> Self {
        Id3Error::EmptySubset {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Id3Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unseen category error
    pub fn unseen_category<S: Into<String>>(feature: S, value: CategoryValue) -> Self {
        Id3Error::UnseenCategory {
            feature: feature.into(),
            value,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        Id3Error::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a data loading error
    pub fn data_loading<S: Into<String>>(message: S) -> Self {
        Id3Error::DataLoading {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Id3Error::Config { .. } => "config",
            Id3Error::UntrainedModel { .. } => "untrained_model",
            Id3Error::EmptySubset { .. } => "empty_subset",
            Id3Error::InvalidInput { .. } => "invalid_input",
            Id3Error::UnseenCategory { .. } => "unseen_category",
            Id3Error::InvalidParameter { .. } => "invalid_parameter",
            Id3Error::DataLoading { .. } => "data_loading",
            Id3Error::Io { .. } => "io",
            Id3Error::Csv { .. } => "csv",
            Id3Error::Json { .. } => "json",
            Id3Error::Toml { .. } => "toml",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::Id3Error::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::Id3Error::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! input_error {
    ($msg:expr) => {
        $crate::core::error::Id3Error::invalid_input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::Id3Error::invalid_input(format!($fmt, $($arg)*))
    };
}
