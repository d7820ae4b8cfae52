//! Runtime configuration.
//!
//! Configuration is read from an optional JSON file and then overridden by
//! command line flags or their environment variables.
//!
//! # Examples
//!
//! ```
//! use veracity::config::{ConfidenceStrategy, VeracityConfig};
//!
//! let config = VeracityConfig::default();
//! assert_eq!(config.model_name, "classifier.json");
//! assert_eq!(config.confidence, ConfidenceStrategy::Fixed { value: 0.85 });
//! assert!(config.artifact_path().ends_with("classifier.json"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};
use crate::ml::confidence::DEFAULT_CONFIDENCE;

/// Default directory holding model artifacts.
pub const DEFAULT_MODEL_PATH: &str = "./models/";

/// Default artifact file name.
pub const DEFAULT_MODEL_NAME: &str = "classifier.json";

/// How confidence values are produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum ConfidenceStrategy {
    /// Report the same value for every prediction.
    Fixed { value: f64 },
    /// Derive confidence from the decision margin.
    Margin,
}

impl Default for ConfidenceStrategy {
    fn default() -> Self {
        ConfidenceStrategy::Fixed {
            value: DEFAULT_CONFIDENCE,
        }
    }
}

/// Bounds enforced on review input at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLimits {
    pub max_text_chars: usize,
    pub max_category_chars: usize,
}

impl Default for ReviewLimits {
    fn default() -> Self {
        ReviewLimits {
            max_text_chars: 5000,
            max_category_chars: 100,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeracityConfig {
    /// Directory containing the model artifact.
    pub model_path: PathBuf,

    /// File name of the model artifact inside `model_path`.
    pub model_name: String,

    /// Confidence strategy.
    pub confidence: ConfidenceStrategy,

    /// Maximum review text length in characters.
    pub max_text_chars: usize,

    /// Maximum category length in characters.
    pub max_category_chars: usize,

    /// Optional word list restricting lemmatizer candidates.
    pub lexicon_path: Option<PathBuf>,

    /// Log level used when no verbosity flag is given.
    pub log_level: String,
}

impl Default for VeracityConfig {
    fn default() -> Self {
        let limits = ReviewLimits::default();
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            confidence: ConfidenceStrategy::default(),
            max_text_chars: limits.max_text_chars,
            max_category_chars: limits.max_category_chars,
            lexicon_path: None,
            log_level: "warn".to_string(),
        }
    }
}

impl VeracityConfig {
    /// Read a configuration file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VeracityError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: VeracityConfig = serde_json::from_str(&content).map_err(|e| {
            VeracityError::invalid_config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Full path of the model artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.model_path.join(&self.model_name)
    }

    /// Input bounds derived from this configuration.
    pub fn limits(&self) -> ReviewLimits {
        ReviewLimits {
            max_text_chars: self.max_text_chars,
            max_category_chars: self.max_category_chars,
        }
    }

    /// Set the model directory.
    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = path.into();
        self
    }

    /// Set the artifact file name.
    pub fn with_model_name<S: Into<String>>(mut self, name: S) -> Self {
        self.model_name = name.into();
        self
    }

    /// Set the confidence strategy.
    pub fn with_confidence(mut self, confidence: ConfidenceStrategy) -> Self {
        self.confidence = confidence;
        self
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            return Err(VeracityError::invalid_config("model_name must not be empty"));
        }

        if let ConfidenceStrategy::Fixed { value } = self.confidence {
            if !(0.0..=1.0).contains(&value) {
                return Err(VeracityError::invalid_config(format!(
                    "fixed confidence must be within [0, 1], got {value}"
                )));
            }
        }

        if self.max_text_chars == 0 || self.max_category_chars == 0 {
            return Err(VeracityError::invalid_config(
                "input length limits must be greater than zero",
            ));
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(VeracityError::invalid_config(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }

        Ok(())
    }
}
