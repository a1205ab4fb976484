//! YAML Configuration File Support for reeldex
//!
//! This module provides support for loading reeldex pipeline configurations
//! from YAML files. It allows users to define all stage settings (source
//! loading, title cleanup, enrichment checkpointing, dataset output) in a
//! single YAML file and load them at runtime.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # reeldex Pipeline Configuration
//! version: "1.0"
//!
//! sources:
//!   input_dir: "data/sources"
//!
//! normalize:
//!   use_builtin_phrases: true
//!   phrase_files:
//!     - "patterns/extra_phrases.txt"
//!   extra_phrases:
//!     - "Exclusive Premiere"
//!
//! enrichment:
//!   checkpoint_path: "data/checkpoint.json"
//!
//! reconcile:
//!   min_runtime_minutes: 90
//!
//! dataset:
//!   output_dir: "data/dataset"
//!   chunk_size: 200
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

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

/// Top-level YAML configuration structure for the entire reeldex pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Source batch loading configuration
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Title cleanup configuration
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Enrichment checkpoint configuration
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Reconciliation configuration
    #[serde(default)]
    pub reconcile: ReconcileConfig,

    /// Dataset output configuration
    #[serde(default)]
    pub dataset: DatasetConfig,
}

impl PipelineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigLoadError> {
        // Check version
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.sources.validate()?;
        self.normalize.validate()?;
        self.enrichment.validate()?;
        self.reconcile.validate()?;
        self.dataset.validate()?;

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            sources: SourcesConfig::default(),
            normalize: NormalizeConfig::default(),
            enrichment: EnrichmentConfig::default(),
            reconcile: ReconcileConfig::default(),
            dataset: DatasetConfig::default(),
        }
    }
}

/// Source batch loading YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Directory scanned for `*.json` batch files
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
}

impl SourcesConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "sources.input_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
        }
    }
}

/// Title cleanup YAML configuration
///
/// Phrase order is significant: files are consumed in listing order, then
/// `extra_phrases`, with the builtin set (when enabled) applied first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Start from the builtin cleanup phrase set
    #[serde(default = "true_value")]
    pub use_builtin_phrases: bool,

    /// Additional phrase files, one phrase per line, `#` comments allowed
    #[serde(default)]
    pub phrase_files: Vec<PathBuf>,

    /// Inline phrases appended after the file-sourced ones
    #[serde(default)]
    pub extra_phrases: Vec<String>,
}

impl NormalizeConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !self.use_builtin_phrases
            && self.phrase_files.is_empty()
            && self.extra_phrases.is_empty()
        {
            return Err(ConfigLoadError::Validation(
                "normalize must enable builtin phrases or supply phrase_files/extra_phrases"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            use_builtin_phrases: true,
            phrase_files: vec![],
            extra_phrases: vec![],
        }
    }
}

/// Enrichment checkpoint YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Path of the resumable checkpoint file
    #[serde(default = "default_checkpoint_path")]
    pub checkpoint_path: PathBuf,
}

impl EnrichmentConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.checkpoint_path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "enrichment.checkpoint_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            checkpoint_path: default_checkpoint_path(),
        }
    }
}

/// Reconciliation YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Minimum runtime in minutes for a record to count as a feature film
    #[serde(default = "default_min_runtime_minutes")]
    pub min_runtime_minutes: f64,
}

impl ReconcileConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !self.min_runtime_minutes.is_finite() || self.min_runtime_minutes <= 0.0 {
            return Err(ConfigLoadError::Validation(
                "reconcile.min_runtime_minutes must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            min_runtime_minutes: default_min_runtime_minutes(),
        }
    }
}

/// Dataset output YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory the chunked dataset is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Records per chunk file
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl DatasetConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "dataset.output_dir must not be empty".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(ConfigLoadError::Validation(
                "dataset.chunk_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            chunk_size: default_chunk_size(),
        }
    }
}

// Helper functions for serde defaults
fn default_input_dir() -> PathBuf {
    PathBuf::from("data/sources")
}
fn default_checkpoint_path() -> PathBuf {
    PathBuf::from("data/checkpoint.json")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("data/dataset")
}
fn default_chunk_size() -> usize {
    200
}
fn default_min_runtime_minutes() -> f64 {
    90.0
}
fn true_value() -> bool {
    true
}
