//! Core data types for the Pure Rust ID3 implementation.
//!
//! This module defines the fundamental scalar aliases and the small
//! enumerations shared by the tree engine, the dataset utilities and the
//! configuration layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical value type. Raw string categories are encoded to dense codes
/// before they reach the tree engine; codes are ordered by their natural
/// integer ordering.
pub type CategoryValue = u32;

/// Row indexing type for datasets and subsets.
pub type DataSize = usize;

/// Node depth in the tree, root = 1.
pub type Stage = usize;

/// Training lifecycle of a decision tree engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No tree is held
    Untrained,
    /// A training loop is running
    Training,
    /// A complete tree is held and can be queried
    Trained,
}

impl Default for EngineState {
    fn default() -> Self {
        EngineState::Untrained
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Untrained => write!(f, "untrained"),
            EngineState::Training => write!(f, "training"),
            EngineState::Trained => write!(f, "trained"),
        }
    }
}

/// What prediction does with a split value that no child was trained for.
///
/// Defaults to `MajorityFallback`: category values that only occur in
/// held-out or test rows are common in small categorical datasets, and
/// evaluation must still produce a score for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnseenCategoryPolicy {
    /// Abort prediction with an `UnseenCategory` error
    Error,
    /// Label the affected rows with the majority class of the node that
    /// could not route them
    MajorityFallback,
}

impl Default for UnseenCategoryPolicy {
    fn default() -> Self {
        UnseenCategoryPolicy::MajorityFallback
    }
}

impl fmt::Display for UnseenCategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnseenCategoryPolicy::Error => write!(f, "error"),
            UnseenCategoryPolicy::MajorityFallback => write!(f, "majority_fallback"),
        }
    }
}
