//! Prediction orchestrator.
//!
//! [`Predictor`] composes the review pipeline: normalize, tokenize, build the
//! feature vector, classify and estimate confidence. It is constructed once
//! and shared by handle; every method takes `&self` and performs no I/O.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::analyzer::review::ReviewAnalyzer;
use crate::analysis::token_filter::lemma::MorphyLemmatizer;
use crate::config::{ConfidenceStrategy, VeracityConfig};
use crate::error::Result;
use crate::ml::classifier::{ArtifactState, ClassifierAdapter};
use crate::ml::confidence::{ConfidenceEstimator, FixedConfidence, MarginConfidence};
use crate::ml::features::{FeatureVector, FeatureVectorBuilder};
use crate::review::{ClassificationResult, Label, RawReviewInput};

/// Readiness of the predictor and its model artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// True only when the artifact is loaded.
    pub ready: bool,
    /// Artifact state: `loaded`, `failed` or `unloaded`.
    pub model: &'static str,
    pub model_version: Option<String>,
    /// Load failure message when the artifact failed.
    pub error: Option<String>,
}

/// Intermediate pipeline outputs for one review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub normalized: String,
    pub tokens: Vec<String>,
    pub features: FeatureVector,
}

/// Review classification service.
pub struct Predictor {
    analyzer: ReviewAnalyzer,
    builder: FeatureVectorBuilder,
    classifier: Arc<ClassifierAdapter>,
    confidence: Box<dyn ConfidenceEstimator>,
}

impl Predictor {
    /// Create a predictor over `classifier` with the default analyzer and
    /// fixed confidence.
    pub fn new(classifier: Arc<ClassifierAdapter>) -> Self {
        Predictor {
            analyzer: ReviewAnalyzer::new(),
            builder: FeatureVectorBuilder::new(),
            classifier,
            confidence: Box::new(FixedConfidence::new()),
        }
    }

    /// Build a predictor from configuration and attempt the artifact load.
    ///
    /// A failed load is recorded in the adapter and reported by
    /// [`health`](Self::health); it does not fail construction. Invalid
    /// configuration and an unreadable lexicon do.
    pub fn from_config(config: &VeracityConfig) -> Result<Self> {
        config.validate()?;

        let analyzer = match &config.lexicon_path {
            Some(path) => ReviewAnalyzer::with_lemmatizer(Box::new(
                MorphyLemmatizer::new().with_lexicon_file(path)?,
            )),
            None => ReviewAnalyzer::new(),
        };

        let classifier = Arc::new(ClassifierAdapter::new());
        let artifact = config.artifact_path();
        if let Err(e) = classifier.load(&artifact) {
            log::warn!("Predictor starting without a model: {e}");
        }

        let confidence: Box<dyn ConfidenceEstimator> = match config.confidence {
            ConfidenceStrategy::Fixed { value } => Box::new(FixedConfidence::with_value(value)),
            ConfidenceStrategy::Margin => {
                Box::new(MarginConfidence::new(Arc::clone(&classifier)))
            }
        };

        Ok(Self::new(classifier)
            .with_analyzer(analyzer)
            .with_confidence(confidence))
    }

    /// Replace the text analyzer.
    pub fn with_analyzer(mut self, analyzer: ReviewAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Replace the confidence estimator.
    pub fn with_confidence(mut self, confidence: Box<dyn ConfidenceEstimator>) -> Self {
        self.confidence = confidence;
        self
    }

    /// The shared classifier adapter.
    pub fn classifier(&self) -> &Arc<ClassifierAdapter> {
        &self.classifier
    }

    /// Build the feature vector for one review.
    pub fn features(&self, input: &RawReviewInput) -> Result<FeatureVector> {
        let tokens = self.analyzer.tokenize(input.text.trim_end())?;
        Ok(self.builder.build(
            input.rating,
            input.verified_purchase,
            &input.category,
            &tokens,
        ))
    }

    /// Classify one review.
    ///
    /// Fails with [`ModelNotLoaded`](crate::error::VeracityError::ModelNotLoaded)
    /// unless the artifact is loaded.
    pub fn predict(&self, input: &RawReviewInput) -> Result<ClassificationResult> {
        let vector = self.features(input)?;
        let model = self.classifier.model()?;
        let class = self.classifier.classify_one(&vector)?;

        Ok(self.result(&vector, class, model.model_version()))
    }

    /// Classify a batch of reviews in one classifier call.
    ///
    /// Results are aligned with `inputs`. Any failure fails the whole batch.
    pub fn predict_batch(&self, inputs: &[RawReviewInput]) -> Result<Vec<ClassificationResult>> {
        let model = self.classifier.model()?;
        let vectors = inputs
            .par_iter()
            .map(|input| self.features(input))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Classifying batch of {} reviews", vectors.len());
        let classes = self.classifier.classify(&vectors)?;

        Ok(vectors
            .iter()
            .zip(classes)
            .map(|(vector, class)| self.result(vector, class, model.model_version()))
            .collect())
    }

    /// Expose the normalized text, tokens and feature vector for a review.
    ///
    /// Works without a loaded model.
    pub fn explain(&self, input: &RawReviewInput) -> Result<Explanation> {
        let text = input.text.trim_end();
        let tokens = self.analyzer.tokenize(text)?;
        let features = self.builder.build(
            input.rating,
            input.verified_purchase,
            &input.category,
            &tokens,
        );

        Ok(Explanation {
            normalized: self.analyzer.normalize(text),
            tokens,
            features,
        })
    }

    /// Whether predictions can be served.
    pub fn is_ready(&self) -> bool {
        self.classifier.is_ready()
    }

    /// Report artifact readiness.
    pub fn health(&self) -> HealthReport {
        let state = self.classifier.state();
        let (model_version, error) = match &state {
            ArtifactState::Loaded(model) => (Some(model.model_version().to_string()), None),
            ArtifactState::Failed(e) => (None, Some(e.to_string())),
            ArtifactState::Unloaded => (None, None),
        };

        HealthReport {
            ready: matches!(state, ArtifactState::Loaded(_)),
            model: state.name(),
            model_version,
            error,
        }
    }

    fn result(&self, vector: &FeatureVector, class: u8, model_version: &str) -> ClassificationResult {
        let label = Label::from_class(class);
        // NaN survives `clamp`; a non-finite estimate carries no confidence.
        let estimate = self.confidence.estimate(vector, label);
        let confidence = if estimate.is_finite() {
            estimate.clamp(0.0, 1.0)
        } else {
            0.0
        };

        ClassificationResult {
            label,
            confidence,
            model_version: model_version.to_string(),
        }
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("analyzer", &self.analyzer)
            .field("classifier", &self.classifier)
            .field("confidence", &self.confidence.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;
    use crate::error::{ArtifactError, VeracityError};
    use crate::ml::model::LinearModel;

    fn model() -> LinearModel {
        let weights: HashMap<String, f64> = [
            ("VP".to_string(), 1.0),
            ("great".to_string(), 0.5),
            ("junk".to_string(), -3.0),
        ]
        .into_iter()
        .collect();
        LinearModel::new("test-1", -0.5, weights)
    }

    fn loaded() -> Predictor {
        Predictor::new(Arc::new(ClassifierAdapter::with_model(Arc::new(model()))))
    }

    fn example() -> RawReviewInput {
        RawReviewInput::new("This product is amazing and great", 5, true, "electronics")
    }

    struct NanConfidence;

    impl ConfidenceEstimator for NanConfidence {
        fn estimate(&self, _vector: &FeatureVector, _label: Label) -> f64 {
            f64::NAN
        }

        fn name(&self) -> &'static str {
            "nan"
        }
    }

    #[test]
    fn test_non_finite_confidence_zeroed() {
        let predictor = loaded().with_confidence(Box::new(NanConfidence));
        let result = predictor.predict(&example()).unwrap();

        assert_eq!(result.label, Label::Real);
        assert_eq!(result.confidence, 0.0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["confidence"], serde_json::json!(0.0));
    }

    #[test]
    fn test_features_example() {
        let predictor = Predictor::new(Arc::new(ClassifierAdapter::new()));
        let vector = predictor.features(&example()).unwrap();

        let expected: FeatureVector = [
            ("R", 1),
            ("VP", 1),
            ("electronics", 1),
            ("product amazing", 1),
            ("amazing great", 1),
            ("product", 1),
            ("amazing", 1),
            ("great", 1),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(vector, expected);
    }

    #[test]
    fn test_trailing_whitespace_ignored() {
        let predictor = loaded();
        let plain = predictor.features(&example()).unwrap();
        let mut padded = example();
        padded.text.push_str("  \n");

        assert_eq!(predictor.features(&padded).unwrap(), plain);
    }

    #[test]
    fn test_predict() {
        let predictor = loaded();

        let result = predictor.predict(&example()).unwrap();
        assert_eq!(result.label, Label::Real);
        assert_eq!(result.confidence, 0.85);
        assert_eq!(result.model_version, "test-1");

        let junk = RawReviewInput::new("total junk", 1, true, "tools");
        assert_eq!(predictor.predict(&junk).unwrap().label, Label::Fake);
    }

    #[test]
    fn test_predict_unloaded() {
        let predictor = Predictor::new(Arc::new(ClassifierAdapter::new()));

        assert!(matches!(
            predictor.predict(&example()),
            Err(VeracityError::ModelNotLoaded)
        ));
        assert!(matches!(
            predictor.predict_batch(&[example(), example()]),
            Err(VeracityError::ModelNotLoaded)
        ));
        assert!(!predictor.is_ready());
    }

    #[test]
    fn test_predict_batch_matches_single() {
        let predictor = loaded();
        let inputs = vec![
            example(),
            RawReviewInput::new("junk junk", 2, false, "toys"),
            RawReviewInput::new("great", 4, false, "toys"),
        ];

        let batch = predictor.predict_batch(&inputs).unwrap();
        assert_eq!(batch.len(), 3);
        for (input, result) in inputs.iter().zip(&batch) {
            assert_eq!(&predictor.predict(input).unwrap(), result);
        }
        assert!(predictor.predict_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_margin_confidence_strategy() {
        let classifier = Arc::new(ClassifierAdapter::with_model(Arc::new(model())));
        let predictor = Predictor::new(Arc::clone(&classifier))
            .with_confidence(Box::new(MarginConfidence::new(classifier)));

        let result = predictor.predict(&example()).unwrap();
        // margin = -0.5 + 1.0 (VP) + 0.5 (great) = 1.0
        let expected = 1.0 / (1.0 + (-1.0f64).exp());
        assert!((result.confidence - expected).abs() < 1e-12);
    }

    #[test]
    fn test_explain_without_model() {
        let predictor = Predictor::new(Arc::new(ClassifierAdapter::new()));
        let input = RawReviewInput::new("Boxes, arrived crushed!", 2, false, "boxes");
        let explanation = predictor.explain(&input).unwrap();

        assert_eq!(explanation.normalized, "Boxes arrived crushed");
        assert_eq!(
            explanation.tokens,
            vec!["box arrived", "arrived crushed", "box", "arrived", "crushed"]
        );
        assert_eq!(explanation.features.get("boxes"), Some(1));
        assert_eq!(explanation.features.get("box"), Some(1));
        assert_eq!(explanation.features.get("VP"), Some(0));
    }

    #[test]
    fn test_health() {
        let report = loaded().health();
        assert!(report.ready);
        assert_eq!(report.model, "loaded");
        assert_eq!(report.model_version.as_deref(), Some("test-1"));
        assert!(report.error.is_none());

        let report = Predictor::new(Arc::new(ClassifierAdapter::new())).health();
        assert!(!report.ready);
        assert_eq!(report.model, "unloaded");
    }

    #[test]
    fn test_from_config_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let config = VeracityConfig::default().with_model_path(dir.path());

        let predictor = Predictor::from_config(&config).unwrap();
        let report = predictor.health();

        assert!(!report.ready);
        assert_eq!(report.model, "failed");
        assert!(report.error.is_some());
        assert_eq!(
            predictor.classifier().failure(),
            Some(ArtifactError::NotFound(config.artifact_path()))
        );
        assert!(matches!(
            predictor.predict(&example()),
            Err(VeracityError::ModelNotLoaded)
        ));
    }

    #[test]
    fn test_from_config_loads_artifact() {
        let dir = TempDir::new().unwrap();
        let config = VeracityConfig::default()
            .with_model_path(dir.path())
            .with_confidence(ConfidenceStrategy::Fixed { value: 0.6 });
        model().save(config.artifact_path()).unwrap();

        let predictor = Predictor::from_config(&config).unwrap();
        assert!(predictor.is_ready());
        assert_eq!(predictor.predict(&example()).unwrap().confidence, 0.6);
    }
}
