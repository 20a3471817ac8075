//! Core configuration structures for Pure Rust ID3.
//!
//! This module provides the tree configuration and its builder. A
//! configuration is validated before an engine accepts it.

use crate::core::constants::*;
use crate::core::error::{Id3Error, Result};
use crate::core::types::UnseenCategoryPolicy;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Parameters of a decision tree engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Maximum stage a node may reach; the root has stage 1
    pub max_depth: usize,
    /// Name of the label column
    pub target_column: String,
    /// Nodes whose entropy is below this threshold become leaves
    pub epsilon: f64,
    /// Handling of split values that were not present during training
    pub unseen_category: UnseenCategoryPolicy,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            epsilon: DEFAULT_EPSILON,
            unseen_category: UnseenCategoryPolicy::default(),
        }
    }
}

impl TreeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_depth < 1 {
            return Err(Id3Error::invalid_parameter(
                "max_depth",
                self.max_depth.to_string(),
                "must be at least 1",
            ));
        }

        if self.target_column.is_empty() {
            return Err(Id3Error::invalid_parameter(
                "target_column",
                "",
                "must name a dataset column",
            ));
        }

        validate_epsilon(self.epsilon)
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: TreeConfig = read_config_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.toml` or `.json` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_config_file(path.as_ref(), self)
    }

    /// Apply `ID3_MAX_DEPTH`, `ID3_TARGET_COLUMN` and `ID3_EPSILON` overrides.
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("ID3_"))
            .collect();
        self.apply_overrides(&vars)
    }

    /// Apply overrides from a variable map, using the environment variable names.
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(val) = vars.get("ID3_MAX_DEPTH") {
            self.max_depth = val
                .parse()
                .map_err(|_| Id3Error::config(format!("Invalid ID3_MAX_DEPTH: {}", val)))?;
        }

        if let Some(val) = vars.get("ID3_TARGET_COLUMN") {
            self.target_column = val.clone();
        }

        if let Some(val) = vars.get("ID3_EPSILON") {
            self.epsilon = val
                .parse()
                .map_err(|_| Id3Error::config(format!("Invalid ID3_EPSILON: {}", val)))?;
        }

        self.validate()
    }
}

/// Reject negative, NaN and infinite entropy thresholds.
pub(crate) fn validate_epsilon(epsilon: f64) -> Result<()> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(Id3Error::invalid_parameter(
            "epsilon",
            epsilon.to_string(),
            "must be a finite non-negative number",
        ));
    }
    Ok(())
}

pub(crate) fn read_config_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Id3Error::config(format!("Failed to read config file: {}", e)))?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(Id3Error::config(
            "Unsupported config file format. Use .json or .toml",
        )),
    }
}

pub(crate) fn write_config_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::to_string_pretty(value)?,
        Some("toml") => toml::to_string_pretty(value)
            .map_err(|e| Id3Error::config(format!("Failed to serialize to TOML: {}", e)))?,
        _ => {
            return Err(Id3Error::config(
                "Unsupported config file format. Use .json or .toml",
            ))
        }
    };

    std::fs::write(path, content)
        .map_err(|e| Id3Error::config(format!("Failed to write config file: {}", e)))?;
    Ok(())
}

/// Builder for [`TreeConfig`]
#[derive(Debug, Clone)]
pub struct TreeConfigBuilder {
    config: TreeConfig,
    validation_errors: Vec<String>,
}

impl TreeConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        TreeConfigBuilder {
            config: TreeConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        if depth < 1 {
            self.validation_errors
                .push("max_depth must be at least 1".to_string());
        }
        self.config.max_depth = depth;
        self
    }

    /// Set the target column name
    pub fn target_column<S: Into<String>>(mut self, target: S) -> Self {
        self.config.target_column = target.into();
        self
    }

    /// Set the entropy threshold
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        if !epsilon.is_finite() || epsilon < 0.0 {
            self.validation_errors
                .push("epsilon must be a finite non-negative number".to_string());
        }
        self.config.epsilon = epsilon;
        self
    }

    /// Set the unseen category policy
    pub fn unseen_category(mut self, policy: UnseenCategoryPolicy) -> Self {
        self.config.unseen_category = policy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TreeConfig> {
        if !self.validation_errors.is_empty() {
            return Err(Id3Error::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for TreeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = TreeConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.target_column, DEFAULT_TARGET_COLUMN);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.unseen_category, UnseenCategoryPolicy::MajorityFallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TreeConfig::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        config.max_depth = 3;
        config.target_column.clear();
        assert!(config.validate().is_err());

        config.target_column = "class".to_string();
        config.epsilon = -0.5;
        assert!(config.validate().is_err());

        config.epsilon = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = TreeConfigBuilder::new()
            .max_depth(7)
            .target_column("class")
            .epsilon(0.0)
            .unseen_category(UnseenCategoryPolicy::Error)
            .build()
            .unwrap();

        assert_eq!(config.max_depth, 7);
        assert_eq!(config.target_column, "class");
        assert_eq!(config.epsilon, 0.0);
        assert_eq!(config.unseen_category, UnseenCategoryPolicy::Error);
    }

    #[test]
    fn test_config_builder_validation() {
        let result = TreeConfigBuilder::new().max_depth(0).epsilon(-1.0).build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("max_depth"));
        assert!(err.to_string().contains("epsilon"));
    }

    #[test]
    fn test_overrides() {
        let mut config = TreeConfig::default();
        let vars: HashMap<String, String> = [
            ("ID3_MAX_DEPTH".to_string(), "9".to_string()),
            ("ID3_TARGET_COLUMN".to_string(), "class".to_string()),
            ("ID3_EPSILON".to_string(), "0.25".to_string()),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(&vars).unwrap();
        assert_eq!(config.max_depth, 9);
        assert_eq!(config.target_column, "class");
        assert_eq!(config.epsilon, 0.25);

        let bad: HashMap<String, String> =
            [("ID3_MAX_DEPTH".to_string(), "deep".to_string())].into_iter().collect();
        assert!(config.apply_overrides(&bad).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = TreeConfigBuilder::new()
            .max_depth(4)
            .target_column("class")
            .build()
            .unwrap();

        for name in ["tree.toml", "tree.json"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            assert_eq!(TreeConfig::load_from_file(&path).unwrap(), config);
        }

        let yaml = dir.path().join("tree.yaml");
        assert!(config.save_to_file(&yaml).is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "max_depth = 2\n").unwrap();

        let config = TreeConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.target_column, DEFAULT_TARGET_COLUMN);
    }
}
