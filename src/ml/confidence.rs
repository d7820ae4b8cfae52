//! Confidence estimation strategies.
//!
//! The predictor asks a [`ConfidenceEstimator`] to score each classification.
//! [`FixedConfidence`] reports a constant; [`MarginConfidence`] derives a
//! probability-like score from the model's decision margin.

use std::sync::Arc;

use crate::ml::classifier::ClassifierAdapter;
use crate::ml::features::FeatureVector;
use crate::review::Label;

/// Confidence reported when nothing better is available.
pub const DEFAULT_CONFIDENCE: f64 = 0.85;

/// Strategy for scoring a classification.
///
/// Implementations must return a value in `[0, 1]`.
pub trait ConfidenceEstimator: Send + Sync {
    /// Score the classification of `vector` as `label`.
    fn estimate(&self, vector: &FeatureVector, label: Label) -> f64;

    /// Get the name of this estimator.
    fn name(&self) -> &'static str;
}

/// Estimator that returns the same confidence for every input.
#[derive(Debug, Clone)]
pub struct FixedConfidence {
    value: f64,
}

impl FixedConfidence {
    /// Create an estimator returning [`DEFAULT_CONFIDENCE`].
    pub fn new() -> Self {
        FixedConfidence {
            value: DEFAULT_CONFIDENCE,
        }
    }

    /// Create an estimator returning `value`, clamped into `[0, 1]`.
    pub fn with_value(value: f64) -> Self {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        FixedConfidence { value }
    }

    /// The constant this estimator reports.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Default for FixedConfidence {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceEstimator for FixedConfidence {
    fn estimate(&self, _vector: &FeatureVector, _label: Label) -> f64 {
        self.value
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Estimator mapping the decision margin through a logistic curve.
///
/// The score is `1 / (1 + e^(-|margin|))`, so a vector on the boundary
/// scores 0.5 and confidence grows with distance from it. When the model
/// exposes no margin the fallback estimator answers instead.
pub struct MarginConfidence {
    classifier: Arc<ClassifierAdapter>,
    fallback: FixedConfidence,
}

impl MarginConfidence {
    /// Create an estimator reading margins from `classifier`.
    pub fn new(classifier: Arc<ClassifierAdapter>) -> Self {
        MarginConfidence {
            classifier,
            fallback: FixedConfidence::new(),
        }
    }

    /// Set the estimator used when no margin is available.
    pub fn with_fallback(mut self, fallback: FixedConfidence) -> Self {
        self.fallback = fallback;
        self
    }
}

impl std::fmt::Debug for MarginConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarginConfidence")
            .field("fallback", &self.fallback.value())
            .finish()
    }
}

impl ConfidenceEstimator for MarginConfidence {
    fn estimate(&self, vector: &FeatureVector, label: Label) -> f64 {
        let margin = self
            .classifier
            .model()
            .ok()
            .and_then(|model| model.decision_margin(vector));

        match margin {
            Some(margin) if margin.is_finite() => sigmoid(margin.abs()),
            _ => self.fallback.estimate(vector, label),
        }
    }

    fn name(&self) -> &'static str {
        "margin"
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
