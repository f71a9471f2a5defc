//! The inference service: one vectorizer, one classifier, loaded once.

use std::time::Instant;

use spamsentry_core::{Label, Message, Verdict};
use tracing::{debug, info};

use crate::artifact::{load_classifier, load_vectorizer};
use crate::{ArtifactError, ArtifactPaths, Classifier, FeatureMatrix, InferenceError, Vectorizer};

/// Classifies messages with a pre-fitted vectorizer and classifier.
///
/// Both artifacts are immutable after construction, so a single service can
/// be shared across threads behind an `Arc` without locking.
pub struct InferenceService {
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
}

/// Overview of the loaded artifacts.
pub struct ServiceSummary {
    pub n_features: usize,
    pub classifier_kind: &'static str,
    pub vectorizer: Vec<(&'static str, String)>,
    pub classifier: Vec<(&'static str, String)>,
}

impl InferenceService {
    /// Pair a vectorizer with a classifier, checking that their feature counts agree.
    pub fn new(
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(ArtifactError::DimensionMismatch {
                vectorizer: vectorizer.n_features(),
                classifier: classifier.n_features(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load both artifacts from disk.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let vectorizer = load_vectorizer(&paths.vectorizer)?;
        let classifier = load_classifier(&paths.classifier)?;
        let service = Self::new(Box::new(vectorizer), Box::new(classifier))?;
        info!(
            features = service.vectorizer.n_features(),
            classifier = service.classifier.kind(),
            "inference service ready"
        );
        Ok(service)
    }

    /// Classify a single message.
    pub fn classify(&self, message: &Message) -> Result<Label, InferenceError> {
        let x = self.features(message)?;
        self.predict_one(&x)
    }

    /// Classify a single message and attach the spam probability.
    pub fn verdict(&self, message: &Message) -> Result<Verdict, InferenceError> {
        let start = Instant::now();
        let x = self.features(message)?;
        let label = self.predict_one(&x)?;
        let verdict = match self.classifier.predict_proba(&x)?.first() {
            Some(&p) => Verdict::with_probability(label, p),
            None => Verdict::new(label),
        };
        debug!(
            label = %label,
            bytes = message.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "classified message"
        );
        Ok(verdict)
    }

    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            n_features: self.vectorizer.n_features(),
            classifier_kind: self.classifier.kind(),
            vectorizer: self.vectorizer.describe(),
            classifier: self.classifier.describe(),
        }
    }

    fn features(&self, message: &Message) -> Result<FeatureMatrix, InferenceError> {
        Ok(self.vectorizer.transform(&[message.as_str()])?)
    }

    fn predict_one(&self, x: &FeatureMatrix) -> Result<Label, InferenceError> {
        self.classifier
            .predict(x)?
            .into_iter()
            .next()
            .ok_or(InferenceError::EmptyPrediction)
    }
}
