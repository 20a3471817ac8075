//! Config-driven experiment runner.
//!
//! [`run_experiment`] loads the data an [`ExperimentConfig`] names, runs its
//! evaluation protocol and returns a serializable [`ExperimentReport`].

use crate::config::{DataSource, EvaluationConfig, ExperimentConfig};
use crate::core::constants::ID3_RUST_VERSION;
use crate::core::error::Result;
use crate::cross_validation::{
    cross_validate, repeated_holdout, CrossValidationConfig, CrossValidationResult, HoldoutResult,
};
use crate::dataset::{CsvLoader, LoadedData};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores produced by the configured evaluation protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EvaluationOutcome {
    /// Repeated holdout scores
    Holdout(HoldoutResult),
    /// K-fold scores
    #[serde(rename = "kfold")]
    KFold(CrossValidationResult),
}

/// Summary of one experiment run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Crate version that produced the report
    pub version: String,
    /// Seed used for every shuffle
    pub seed: u64,
    /// Target column
    pub target_column: String,
    /// Training rows loaded
    pub train_rows: usize,
    /// Test rows loaded, if a test file was given
    pub test_rows: Option<usize>,
    /// Feature columns, in dataset order
    pub features: Vec<String>,
    /// Evaluation scores
    pub outcome: EvaluationOutcome,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ID3 experiment: {} training rows, {} features, target '{}'",
            self.train_rows,
            self.features.len(),
            self.target_column
        )?;

        let (label, train, validation, test) = match &self.outcome {
            EvaluationOutcome::Holdout(result) => (
                format!("{} repeats", result.trials.len()),
                result.train,
                result.validation,
                result.test,
            ),
            EvaluationOutcome::KFold(result) => (
                format!("{}-fold CV", result.num_folds),
                result.train,
                result.validation,
                result.test,
            ),
        };

        writeln!(f, "Train average accuracy with {}: {:.3}", label, train.mean)?;
        write!(
            f,
            "Validation average accuracy with {}: {:.3}",
            label, validation.mean
        )?;
        if let Some(test) = test {
            write!(f, "\nTest average accuracy with {}: {:.3}", label, test.mean)?;
        }
        Ok(())
    }
}

/// Load the experiment's data as its source setting describes.
pub fn load_data(config: &ExperimentConfig) -> Result<LoadedData> {
    let data = &config.data;
    let loader = CsvLoader::new(config.loader_config())?;

    match data.source {
        DataSource::Raw => loader.load_raw(data.train_path.as_path(), data.test_path.as_deref()),
        DataSource::EncodedCsv => {
            let train = loader.load_encoded_csv(&data.train_path)?;
            let test = match &data.test_path {
                Some(path) => Some(loader.load_encoded_csv(path)?),
                None => None,
            };
            Ok(LoadedData {
                train,
                test,
                encoder: None,
            })
        }
        DataSource::ConvertRaw => loader.convert_raw_to_csv(
            data.train_path.as_path(),
            data.test_path.as_deref(),
            data.encoded_train_path.as_path(),
            data.test_path
                .as_ref()
                .map(|_| data.encoded_test_path.as_path()),
        ),
    }
}

/// Run an experiment end to end.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;
    let loaded = load_data(config)?;
    let train = &loaded.train;
    let test = loaded.test.as_ref();
    let features = train.feature_names(&config.tree.target_column)?;

    info!(
        "Loaded {} training rows{} with {} features",
        train.num_rows(),
        test.map(|t| format!(" and {} test rows", t.num_rows()))
            .unwrap_or_default(),
        features.len()
    );

    let outcome = match config.evaluation {
        EvaluationConfig::Holdout {
            train_fraction,
            repeats,
        } => EvaluationOutcome::Holdout(repeated_holdout(
            train,
            &config.tree,
            train_fraction,
            repeats,
            config.seed,
            test,
        )?),
        EvaluationConfig::KFold { n_folds } => {
            let cv = CrossValidationConfig::new()
                .with_num_folds(n_folds)
                .with_random_seed(config.seed);
            EvaluationOutcome::KFold(cross_validate(train, &config.tree, &cv, test)?)
        }
    };

    Ok(ExperimentReport {
        version: ID3_RUST_VERSION.to_string(),
        seed: config.seed,
        target_column: config.tree.target_column.clone(),
        train_rows: train.num_rows(),
        test_rows: test.map(|t| t.num_rows()),
        features,
        outcome,
    })
}
