//! Metrics evaluation module for Pure Rust ID3.
//!
//! This module provides classification accuracy and the summary statistics
//! used to aggregate scores over repeats and folds.

use crate::core::error::{Id3Error, Result};
use crate::core::types::CategoryValue;
use log::warn;
use serde::{Deserialize, Serialize};

/// Fraction of positions where the prediction equals the ground truth.
///
/// Mismatched lengths are an error. Empty input scores 0.0.
pub fn accuracy(predictions: &[CategoryValue], ground_truth: &[CategoryValue]) -> Result<f64> {
    if predictions.len() != ground_truth.len() {
        return Err(Id3Error::invalid_input(format!(
            "accuracy needs equal lengths, got {} predictions and {} labels",
            predictions.len(),
            ground_truth.len()
        )));
    }

    if predictions.is_empty() {
        warn!("accuracy requested over zero predictions");
        return Ok(0.0);
    }

    let correct = predictions
        .iter()
        .zip(ground_truth)
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f64 / predictions.len() as f64)
}

/// Arithmetic mean, 0.0 for no values
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0.0 for no values
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Aggregate of a series of scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Mean score
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Lowest score
    pub min: f64,
    /// Highest score
    pub max: f64,
}

impl ScoreSummary {
    /// Summarize `scores`; all fields are 0.0 for an empty series.
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return ScoreSummary {
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        ScoreSummary {
            mean: mean(scores),
            std_dev: std_dev(scores),
            min: scores.iter().copied().fold(f64::INFINITY, f64::min),
            max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}
