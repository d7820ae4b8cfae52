//! # Veracity
//!
//! Classifies product reviews as real or fake.
//!
//! ## Features
//!
//! - Review text analysis: punctuation removal, stop words, noun
//!   lemmatization and bigrams
//! - Sparse feature vectors combining text with review metadata
//! - Portable, versioned linear model artifacts
//! - Load-once classifier with explicit readiness reporting
//! - Pluggable confidence estimation

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;
pub mod review;

pub mod prelude {
    pub use crate::config::VeracityConfig;
    pub use crate::error::{ArtifactError, Result, VeracityError};
    pub use crate::ml::{ClassifierAdapter, LinearModel, Predictor};
    pub use crate::review::{ClassificationResult, Label, RawReviewInput};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
