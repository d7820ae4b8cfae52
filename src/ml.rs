//! Review classification: feature construction and model inference.
//!
//! - [`features`] turns analyzed tokens plus review metadata into a sparse
//!   count vector.
//! - [`model`] reads and writes the versioned linear model artifact.
//! - [`classifier`] wraps the artifact behind a load-once state machine.
//! - [`confidence`] scores a classification.
//! - [`predictor`] composes the whole pipeline.

pub mod classifier;
pub mod confidence;
pub mod features;
pub mod model;
pub mod predictor;

pub use classifier::{ArtifactState, ClassifierAdapter, DecisionFunction};
pub use confidence::{ConfidenceEstimator, FixedConfidence, MarginConfidence};
pub use features::{FeatureVector, FeatureVectorBuilder};
pub use model::LinearModel;
pub use predictor::{Explanation, HealthReport, Predictor};
