//! Review request and response types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ReviewLimits;
use crate::error::{Result, VeracityError};

/// A single review as submitted for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReviewInput {
    /// Free-form review text.
    pub text: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Whether the purchase was verified.
    #[serde(default)]
    pub verified_purchase: bool,
    /// Product category name.
    pub category: String,
}

impl RawReviewInput {
    /// Create a new review input.
    pub fn new<T, C>(text: T, rating: u8, verified_purchase: bool, category: C) -> Self
    where
        T: Into<String>,
        C: Into<String>,
    {
        RawReviewInput {
            text: text.into(),
            rating,
            verified_purchase,
            category: category.into(),
        }
    }

    /// Check the input against the request bounds.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self, limits: &ReviewLimits) -> Result<()> {
        let text_chars = self.text.chars().count();
        if text_chars == 0 || text_chars > limits.max_text_chars {
            return Err(VeracityError::invalid_argument(format!(
                "text must be between 1 and {} characters, got {text_chars}",
                limits.max_text_chars
            )));
        }

        if !(1..=5).contains(&self.rating) {
            return Err(VeracityError::invalid_argument(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }

        let category_chars = self.category.chars().count();
        if category_chars == 0 || category_chars > limits.max_category_chars {
            return Err(VeracityError::invalid_argument(format!(
                "category must be between 1 and {} characters, got {category_chars}",
                limits.max_category_chars
            )));
        }

        Ok(())
    }
}

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    /// Map a classifier class to a label: 1 is real, anything else fake.
    pub fn from_class(class: u8) -> Self {
        if class == 1 { Label::Real } else { Label::Fake }
    }

    /// Lowercase name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "real",
            Label::Fake => "fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub label: Label,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub model_version: String,
}

/// Aggregate counts over a set of classification results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionStats {
    pub total: usize,
    pub real: usize,
    pub fake: usize,
    /// Mean confidence, 0 when there are no results.
    pub average_confidence: f64,
}

impl PredictionStats {
    /// Summarize `results`.
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        if results.is_empty() {
            return PredictionStats::default();
        }

        let real = results.iter().filter(|r| r.label == Label::Real).count();
        let sum: f64 = results.iter().map(|r| r.confidence).sum();

        PredictionStats {
            total: results.len(),
            real,
            fake: results.len() - real,
            average_confidence: sum / results.len() as f64,
        }
    }

    /// Share of results labelled real, 0 when empty.
    pub fn real_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.real as f64 / self.total as f64
        }
    }
}
