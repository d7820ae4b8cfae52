//! Classifier adapter and artifact lifecycle.
//!
//! The adapter owns the process-wide classifier artifact and its state:
//!
//! ```text
//! Unloaded ──load ok──▶ Loaded
//!    │
//!    └──load error──▶ Failed   (terminal)
//! ```
//!
//! Only `Loaded` can classify. Once loaded the model is immutable and shared
//! through an `Arc`, so concurrent classifications need no coordination; the
//! lock only guards the single startup transition.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{ArtifactError, Result, VeracityError};
use crate::ml::features::FeatureVector;
use crate::ml::model::LinearModel;

/// Opaque binary decision function over feature vectors.
///
/// Implementations must return exactly one class per input vector, each
/// either 0 or 1, aligned with the input order.
pub trait DecisionFunction: Send + Sync {
    /// Classify a batch of vectors.
    fn classify_many(&self, vectors: &[FeatureVector]) -> Vec<u8>;

    /// Signed distance from the decision boundary, when the model has one.
    fn decision_margin(&self, _vector: &FeatureVector) -> Option<f64> {
        None
    }

    /// Version string of the loaded model.
    fn model_version(&self) -> &str;
}

/// Lifecycle state of the classifier artifact.
#[derive(Clone)]
pub enum ArtifactState {
    /// No load has been attempted yet.
    Unloaded,
    /// The artifact loaded and is ready to classify.
    Loaded(Arc<dyn DecisionFunction>),
    /// Loading failed; the state never changes again.
    Failed(ArtifactError),
}

impl ArtifactState {
    /// Short name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactState::Unloaded => "unloaded",
            ArtifactState::Loaded(_) => "loaded",
            ArtifactState::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Debug for ArtifactState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactState::Unloaded => write!(f, "Unloaded"),
            ArtifactState::Loaded(model) => write!(f, "Loaded({})", model.model_version()),
            ArtifactState::Failed(e) => write!(f, "Failed({e})"),
        }
    }
}

/// Load-once wrapper around a classifier artifact.
#[derive(Debug)]
pub struct ClassifierAdapter {
    state: RwLock<ArtifactState>,
}

impl ClassifierAdapter {
    /// Create an adapter with no artifact loaded.
    pub fn new() -> Self {
        ClassifierAdapter {
            state: RwLock::new(ArtifactState::Unloaded),
        }
    }

    /// Create an adapter that is already loaded with the given model.
    pub fn with_model(model: Arc<dyn DecisionFunction>) -> Self {
        ClassifierAdapter {
            state: RwLock::new(ArtifactState::Loaded(model)),
        }
    }

    /// Load a linear model artifact from `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ArtifactError> {
        let path = path.as_ref();
        self.load_with(|| {
            let model = LinearModel::load(path)?;
            log::info!(
                "loaded model {} ({} features) from {}",
                model.version(),
                model.num_features(),
                path.display()
            );
            Ok(Arc::new(model) as Arc<dyn DecisionFunction>)
        })
    }

    /// Run `loader` to perform the `Unloaded` transition.
    ///
    /// Only the first call does any work. Later calls leave the state alone
    /// and report the outcome already recorded.
    pub fn load_with<F>(&self, loader: F) -> std::result::Result<(), ArtifactError>
    where
        F: FnOnce() -> std::result::Result<Arc<dyn DecisionFunction>, ArtifactError>,
    {
        let mut state = self.state.write();
        match &*state {
            ArtifactState::Loaded(model) => {
                log::warn!(
                    "model {} already loaded; ignoring load request",
                    model.model_version()
                );
                Ok(())
            }
            ArtifactState::Failed(e) => Err(e.clone()),
            ArtifactState::Unloaded => match loader() {
                Ok(model) => {
                    *state = ArtifactState::Loaded(model);
                    Ok(())
                }
                Err(e) => {
                    log::error!("failed to load model: {e}");
                    *state = ArtifactState::Failed(e.clone());
                    Err(e)
                }
            },
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ArtifactState {
        self.state.read().clone()
    }

    /// Whether classification can succeed.
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), ArtifactState::Loaded(_))
    }

    /// The recorded load failure, if loading failed.
    pub fn failure(&self) -> Option<ArtifactError> {
        match &*self.state.read() {
            ArtifactState::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    /// Handle to the loaded model.
    pub fn model(&self) -> Result<Arc<dyn DecisionFunction>> {
        match &*self.state.read() {
            ArtifactState::Loaded(model) => Ok(Arc::clone(model)),
            _ => Err(VeracityError::ModelNotLoaded),
        }
    }

    /// Version of the loaded model.
    pub fn model_version(&self) -> Option<String> {
        self.model().ok().map(|model| model.model_version().to_string())
    }

    /// Classify a batch of vectors; output is aligned with input.
    ///
    /// Either every vector is classified or an error is returned.
    pub fn classify(&self, vectors: &[FeatureVector]) -> Result<Vec<u8>> {
        let model = self.model()?;
        let classes = model.classify_many(vectors);

        if classes.len() != vectors.len() {
            return Err(anyhow::anyhow!(
                "classifier returned {} classes for {} vectors",
                classes.len(),
                vectors.len()
            )
            .into());
        }
        if let Some(bad) = classes.iter().find(|&&class| class > 1) {
            return Err(anyhow::anyhow!("classifier returned class {bad}, expected 0 or 1").into());
        }

        Ok(classes)
    }

    /// Classify a single vector.
    pub fn classify_one(&self, vector: &FeatureVector) -> Result<u8> {
        let classes = self.classify(std::slice::from_ref(vector))?;
        classes
            .first()
            .copied()
            .ok_or_else(|| VeracityError::other("classifier returned no class"))
    }
}

impl Default for ClassifierAdapter {
    fn default() -> Self {
        Self::new()
    }
}
