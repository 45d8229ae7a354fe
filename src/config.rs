//! YAML configuration files for experiment runs.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "reuters minhash sweep"
//!
//! experiment:
//!   k_values: [16, 32, 64, 128, 256]
//!   seed: 1732584193
//!   use_parallel: false
//!   empty_vector_policy: "truncate"
//!
//! datasets:
//!   - label: "standard feature vector"
//!     path: "data/standard.json"
//!   - label: "pared feature vector"
//!     path: "data/pared.json"
//!
//! output: "text"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use corpus::{load_dataset, CorpusError, LabeledDataset};
use serde::{Deserialize, Serialize};
use sketch::{EmptyVectorPolicy, SketchConfig};
use thiserror::Error;

use crate::{ExperimentConfig, DEFAULT_K_VALUES};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// How the binary prints report records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per record, one record per line.
    Json,
}

/// Top-level YAML configuration for an experiment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinwiseConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub experiment: ExperimentYamlConfig,

    /// Dataset files, in presentation order
    #[serde(default)]
    pub datasets: Vec<DatasetSource>,

    #[serde(default)]
    pub output: OutputFormat,
}

impl MinwiseConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: MinwiseConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.experiment.validate()?;
        for (idx, source) in self.datasets.iter().enumerate() {
            if source.path.as_os_str().is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "datasets[{idx}].path must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Load every configured dataset file, applying label overrides.
    pub fn load_datasets(&self) -> Result<Vec<LabeledDataset>, CorpusError> {
        self.datasets
            .iter()
            .map(|source| -> Result<LabeledDataset, CorpusError> {
                let mut labeled = load_dataset(&source.path)?;
                if let Some(label) = &source.label {
                    labeled.label = label.clone();
                }
                Ok(labeled)
            })
            .collect()
    }

    /// Experiment settings for the given datasets, labeled in order.
    pub fn experiment_config(&self, datasets: &[LabeledDataset]) -> ExperimentConfig {
        ExperimentConfig::new()
            .with_k_values(self.experiment.k_values.clone())
            .with_dataset_labels(datasets.iter().map(|d| d.label.clone()))
            .with_sketch(self.experiment.sketch_config())
    }
}

impl Default for MinwiseConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            experiment: ExperimentYamlConfig::default(),
            datasets: Vec::new(),
            output: OutputFormat::default(),
        }
    }
}

/// Experiment section of the YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentYamlConfig {
    #[serde(default = "default_k_values")]
    pub k_values: Vec<usize>,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub use_parallel: bool,

    #[serde(default)]
    pub empty_vector_policy: EmptyVectorPolicy,
}

impl ExperimentYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        ExperimentConfig::new()
            .with_k_values(self.k_values.clone())
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("experiment: {err}")))
    }

    pub fn sketch_config(&self) -> SketchConfig {
        SketchConfig {
            seed: self.seed,
            use_parallel: self.use_parallel,
            empty_vector_policy: self.empty_vector_policy,
        }
    }
}

impl Default for ExperimentYamlConfig {
    fn default() -> Self {
        Self {
            k_values: default_k_values(),
            seed: None,
            use_parallel: false,
            empty_vector_policy: EmptyVectorPolicy::default(),
        }
    }
}

/// One dataset file entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetSource {
    /// Report label; defaults to the label stored in the file
    #[serde(default)]
    pub label: Option<String>,
    pub path: PathBuf,
}

fn default_k_values() -> Vec<usize> {
    DEFAULT_K_VALUES.to_vec()
}
