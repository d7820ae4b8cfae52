//! Error types for the Veracity library.
//!
//! All fallible operations return [`VeracityError`] through the crate-wide
//! [`Result`] alias. Failures while loading a classifier artifact are
//! described by [`ArtifactError`], which is kept as its own type so a
//! terminal load failure can be stored and reported repeatedly by health
//! checks.
//!
//! # Examples
//!
//! ```
//! use veracity::error::{VeracityError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VeracityError::invalid_argument("rating must be between 1 and 5"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a classifier artifact could not be loaded.
///
/// Any of these leaves the classifier in its terminal `Failed` state: the
/// process keeps running but never reports ready.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    /// The configured path does not resolve to a file.
    #[error("model artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read or decoded.
    #[error("corrupt model artifact {}: {reason}", .path.display())]
    CorruptArtifact { path: PathBuf, reason: String },

    /// The file decoded but declares a format this build cannot run.
    #[error("incompatible model artifact {}: {reason}", .path.display())]
    IncompatibleFormat { path: PathBuf, reason: String },
}

impl ArtifactError {
    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ArtifactError::NotFound(_) => "not_found",
            ArtifactError::CorruptArtifact { .. } => "corrupt_artifact",
            ArtifactError::IncompatibleFormat { .. } => "incompatible_format",
        }
    }
}

/// The main error type for Veracity operations.
#[derive(Error, Debug)]
pub enum VeracityError {
    /// The classifier artifact failed to load.
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Classification was requested while no artifact is loaded.
    #[error("Model not loaded")]
    ModelNotLoaded,

    /// Input rejected at the validation boundary.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VeracityError.
pub type Result<T> = std::result::Result<T, VeracityError>;

impl VeracityError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VeracityError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        VeracityError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VeracityError::Other(msg.into())
    }

    /// Whether this error means the model is not available for inference.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(
            self,
            VeracityError::ModelNotLoaded | VeracityError::Artifact(_)
        )
    }
}
