//! Experiment configuration.
//!
//! An experiment names its data files, the tree parameters and the
//! evaluation protocol. It is read from a `.toml` or `.json` file:
//!
//! ```toml
//! seed = 42
//!
//! [data]
//! source = "raw"
//! train_path = "data/train.data"
//! test_path = "data/test.data"
//! feature_names = ["buying", "maint", "doors"]
//!
//! [tree]
//! max_depth = 5
//! target_column = "label"
//!
//! [evaluation]
//! method = "kfold"
//! n_folds = 5
//! ```

use super::core::{read_config_file, write_config_file, TreeConfig};
use crate::core::constants::*;
use crate::core::error::{Id3Error, Result};
use crate::dataset::LoaderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the experiment data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Header-less files of string categories, encoded in memory
    Raw,
    /// CSV files of category codes with a header row
    EncodedCsv,
    /// Raw files encoded and written to the encoded CSV paths before use
    ConvertRaw,
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Raw
    }
}

/// Data file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Input format
    pub source: DataSource,
    /// Training file
    pub train_path: PathBuf,
    /// Optional test file
    pub test_path: Option<PathBuf>,
    /// Feature names of raw files, in file order after the target
    pub feature_names: Vec<String>,
    /// Field delimiter
    pub delimiter: char,
    /// Whether raw files start with a header row
    pub raw_has_header: bool,
    /// Destination of the encoded training CSV for `convert_raw`
    pub encoded_train_path: PathBuf,
    /// Destination of the encoded test CSV for `convert_raw`
    pub encoded_test_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            source: DataSource::default(),
            train_path: PathBuf::new(),
            test_path: None,
            feature_names: Vec::new(),
            delimiter: ',',
            raw_has_header: false,
            encoded_train_path: PathBuf::from("train.csv"),
            encoded_test_path: PathBuf::from("test.csv"),
        }
    }
}

/// How trained trees are scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EvaluationConfig {
    /// Repeated random holdout splits of the training data
    Holdout {
        /// Fraction of training rows kept for fitting in each repeat
        train_fraction: f64,
        /// Number of repeats
        repeats: usize,
    },
    /// K-fold cross-validation over the training data
    #[serde(rename = "kfold")]
    KFold {
        /// Number of folds
        n_folds: usize,
    },
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig::Holdout {
            train_fraction: DEFAULT_TRAIN_FRACTION,
            repeats: DEFAULT_TRAIN_REPEATS,
        }
    }
}

/// Complete experiment description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Seed for every shuffle in the experiment
    pub seed: u64,
    /// Data files
    pub data: DataConfig,
    /// Tree parameters
    pub tree: TreeConfig,
    /// Evaluation protocol
    pub evaluation: EvaluationConfig,
}

impl ExperimentConfig {
    /// Validate the experiment
    pub fn validate(&self) -> Result<()> {
        self.tree.validate()?;

        if self.data.train_path.as_os_str().is_empty() {
            return Err(Id3Error::invalid_parameter(
                "data.train_path",
                "",
                "must name a file",
            ));
        }

        if self.data.source != DataSource::EncodedCsv && self.data.feature_names.is_empty() {
            return Err(Id3Error::invalid_parameter(
                "data.feature_names",
                "[]",
                "raw data files need their feature names",
            ));
        }

        match self.evaluation {
            EvaluationConfig::Holdout {
                train_fraction,
                repeats,
            } => {
                if !(train_fraction > 0.0 && train_fraction < 1.0) {
                    return Err(Id3Error::invalid_parameter(
                        "evaluation.train_fraction",
                        train_fraction.to_string(),
                        "must be in range (0.0, 1.0)",
                    ));
                }
                if repeats < 1 {
                    return Err(Id3Error::invalid_parameter(
                        "evaluation.repeats",
                        repeats.to_string(),
                        "must be at least 1",
                    ));
                }
            }
            EvaluationConfig::KFold { n_folds } => {
                if n_folds < 2 {
                    return Err(Id3Error::invalid_parameter(
                        "evaluation.n_folds",
                        n_folds.to_string(),
                        "must be at least 2",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Load an experiment from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config: ExperimentConfig = read_config_file(path.as_ref())?;
        config.tree.apply_environment_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Save the experiment to a `.toml` or `.json` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_config_file(path.as_ref(), self)
    }

    /// Loader settings matching this experiment's data layout
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::new(self.data.feature_names.clone())
            .with_target_column(self.tree.target_column.clone())
            .with_delimiter(self.data.delimiter)
            .with_raw_header(self.data.raw_has_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ExperimentConfig {
        ExperimentConfig {
            seed: 7,
            data: DataConfig {
                train_path: PathBuf::from("train.data"),
                feature_names: vec!["a".to_string(), "b".to_string()],
                ..DataConfig::default()
            },
            tree: TreeConfig::default(),
            evaluation: EvaluationConfig::KFold { n_folds: 4 },
        }
    }

    #[test]
    fn test_validation() {
        assert!(sample().validate().is_ok());

        let mut config = sample();
        config.data.feature_names.clear();
        assert!(config.validate().is_err());
        config.data.source = DataSource::EncodedCsv;
        assert!(config.validate().is_ok());

        let mut config = sample();
        config.evaluation = EvaluationConfig::KFold { n_folds: 1 };
        assert!(config.validate().is_err());

        let mut config = sample();
        config.evaluation = EvaluationConfig::Holdout {
            train_fraction: 1.5,
            repeats: 2,
        };
        assert!(config.validate().is_err());

        let mut config = sample();
        config.data.train_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
            seed = 3

            [data]
            source = "convert_raw"
            train_path = "cars.data"
            feature_names = ["buying", "maint"]
            raw_has_header = true

            [tree]
            max_depth = 4

            [evaluation]
            method = "holdout"
            train_fraction = 0.6
            repeats = 3
        "#;
        let config: ExperimentConfig = toml::from_str(text).unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.data.source, DataSource::ConvertRaw);
        assert_eq!(config.data.encoded_train_path, PathBuf::from("train.csv"));
        assert!(config.data.raw_has_header);
        assert_eq!(config.tree.max_depth, 4);
        assert_eq!(
            config.evaluation,
            EvaluationConfig::Holdout {
                train_fraction: 0.6,
                repeats: 3
            }
        );
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = sample();
        for name in ["experiment.toml", "experiment.json"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            let loaded: ExperimentConfig = read_config_file(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_loader_config() {
        let loader = sample().loader_config();
        assert_eq!(loader.raw_columns(), vec!["label", "a", "b"]);
        assert!(!loader.raw_has_header);

        let mut config = sample();
        config.data.raw_has_header = true;
        config.data.delimiter = ';';
        let loader = config.loader_config();
        assert!(loader.raw_has_header);
        assert_eq!(loader.delimiter, ';');
    }
}
