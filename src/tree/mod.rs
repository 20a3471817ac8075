//! ID3 tree construction and traversal.
//!
//! This module provides the information gain routines, the tree node with
//! its per-node training and prediction steps, and the engine that drives
//! both over an explicit work stack.

pub mod information_gain;
pub mod node;
pub mod stack;
pub mod tree;

// Re-export key types for easy access
pub use information_gain::{entropy_from_counts, InformationGain};
pub use node::{Branch, TreeNode};
pub use stack::WorkStack;
pub use tree::{DecisionTree, PredictionOutput};
