//! Linear model artifact.
//!
//! A classifier artifact is a small JSON document that any training stack
//! can produce:
//!
//! ```json
//! {
//!   "format": "veracity-linear",
//!   "format_version": 1,
//!   "model_version": "2024.1",
//!   "bias": -0.12,
//!   "weights": { "R": 0.01, "VP": 0.83, "great": 0.4 }
//! }
//! ```
//!
//! The decision margin is `bias + Σ weights[k] · count[k]` over the keys a
//! feature vector shares with the weight table; keys the model never saw
//! contribute nothing. A positive margin is class 1 (real), anything else
//! class 0 (fake).

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{ArtifactError, Result};
use crate::ml::classifier::DecisionFunction;
use crate::ml::features::FeatureVector;

/// Format identifier written into every artifact.
pub const ARTIFACT_FORMAT: &str = "veracity-linear";

/// Artifact format versions this build can read.
pub const SUPPORTED_FORMAT_VERSIONS: &[u32] = &[1];

/// Format version written by [`LinearModel::save`].
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// A binary linear classifier over sparse feature counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    format: String,
    format_version: u32,
    model_version: String,
    bias: f64,
    weights: HashMap<String, f64>,
}

impl LinearModel {
    /// Create a model in the current artifact format.
    pub fn new<S: Into<String>>(model_version: S, bias: f64, weights: HashMap<String, f64>) -> Self {
        LinearModel {
            format: ARTIFACT_FORMAT.to_string(),
            format_version: CURRENT_FORMAT_VERSION,
            model_version: model_version.into(),
            bias,
            weights,
        }
    }

    /// Read an artifact from disk.
    ///
    /// The header is checked before the body is decoded, so an artifact
    /// from another format reports [`ArtifactError::IncompatibleFormat`]
    /// rather than a decoding failure.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ArtifactError> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound || path.is_dir() => {
                return Err(ArtifactError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(corrupt(path, e.to_string())),
        };

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| corrupt(path, e.to_string()))?;

        let format = value
            .get("format")
            .and_then(|f| f.as_str())
            .ok_or_else(|| incompatible(path, "missing format identifier"))?;
        if format != ARTIFACT_FORMAT {
            return Err(incompatible(
                path,
                format!("expected format {ARTIFACT_FORMAT:?}, found {format:?}"),
            ));
        }

        let version = value
            .get("format_version")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| incompatible(path, "missing format_version"))?;
        if !SUPPORTED_FORMAT_VERSIONS
            .iter()
            .any(|&supported| u64::from(supported) == version)
        {
            return Err(incompatible(
                path,
                format!("unsupported format_version {version}"),
            ));
        }

        let model: LinearModel =
            serde_json::from_value(value).map_err(|e| corrupt(path, e.to_string()))?;
        model.check_finite().map_err(|reason| corrupt(path, reason))?;

        Ok(model)
    }

    /// Write the artifact atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
        }
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }

    /// Signed distance from the decision boundary.
    pub fn margin(&self, vector: &FeatureVector) -> f64 {
        vector
            .iter()
            .filter_map(|(key, &count)| self.weights.get(key).map(|w| w * f64::from(count)))
            .sum::<f64>()
            + self.bias
    }

    /// Class for one vector: 1 when the margin is positive, otherwise 0.
    pub fn predict(&self, vector: &FeatureVector) -> u8 {
        u8::from(self.margin(vector) > 0.0)
    }

    /// The version string recorded in the artifact.
    pub fn version(&self) -> &str {
        &self.model_version
    }

    /// The artifact format version.
    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    /// Number of weighted features.
    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    fn check_finite(&self) -> std::result::Result<(), String> {
        if !self.bias.is_finite() {
            return Err("bias is not finite".to_string());
        }
        match self.weights.iter().find(|(_, w)| !w.is_finite()) {
            Some((key, _)) => Err(format!("weight for {key:?} is not finite")),
            None => Ok(()),
        }
    }
}

impl DecisionFunction for LinearModel {
    fn classify_many(&self, vectors: &[FeatureVector]) -> Vec<u8> {
        vectors.iter().map(|vector| self.predict(vector)).collect()
    }

    fn decision_margin(&self, vector: &FeatureVector) -> Option<f64> {
        Some(self.margin(vector))
    }

    fn model_version(&self) -> &str {
        self.version()
    }
}

fn corrupt<S: Into<String>>(path: &Path, reason: S) -> ArtifactError {
    ArtifactError::CorruptArtifact {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn incompatible<S: Into<String>>(path: &Path, reason: S) -> ArtifactError {
    ArtifactError::IncompatibleFormat {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
