//! Pre-trained binary spam classifiers.
//!
//! Two model families are supported, both stored as plain weights:
//! multinomial naive Bayes (per-class log priors and per-feature log
//! probabilities) and a linear decision function (logistic regression or a
//! linear SVM). Neither is trained here.

use serde::{Deserialize, Deserializer};
use spamsentry_core::Label;

use crate::matrix::dot;
use crate::{FeatureMatrix, PredictError};

/// Features-to-labels capability of a fitted classifier.
pub trait Classifier: Send + Sync {
    /// One label per matrix row.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>, PredictError>;

    /// Probability of spam per matrix row.
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f32>, PredictError>;

    /// Number of columns the model expects.
    fn n_features(&self) -> usize;

    /// Short model family name.
    fn kind(&self) -> &'static str;

    /// `(property, value)` pairs for summaries.
    fn describe(&self) -> Vec<(&'static str, String)>;
}

/// Any supported classifier, tagged by `type` in the artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierModel {
    MultinomialNb(MultinomialNb),
    Linear(LinearModel),
}

impl ClassifierModel {
    fn inner(&self) -> &dyn Classifier {
        match self {
            Self::MultinomialNb(m) => m,
            Self::Linear(m) => m,
        }
    }

    /// Check shapes, values, and classes. Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::MultinomialNb(m) => m.validate(),
            Self::Linear(m) => m.validate(),
        }
    }
}

impl Classifier for ClassifierModel {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>, PredictError> {
        self.inner().predict(x)
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f32>, PredictError> {
        self.inner().predict_proba(x)
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        self.inner().describe()
    }
}

// ── Multinomial naive Bayes ──

/// Multinomial naive Bayes over term counts or TF-IDF weights.
#[derive(Debug, Clone, Deserialize)]
pub struct MultinomialNb {
    #[serde(deserialize_with = "deserialize_classes")]
    classes: [Label; 2],
    class_log_prior: Vec<f32>,
    feature_log_prob: Vec<Vec<f32>>,
}

impl MultinomialNb {
    fn validate(&self) -> Result<(), String> {
        validate_classes(&self.classes)?;
        if self.class_log_prior.len() != 2 {
            return Err(format!(
                "class_log_prior has {} entries, expected 2",
                self.class_log_prior.len()
            ));
        }
        if self.feature_log_prob.len() != 2 {
            return Err(format!(
                "feature_log_prob has {} rows, expected 2",
                self.feature_log_prob.len()
            ));
        }
        let n = self.feature_log_prob[0].len();
        if n == 0 || self.feature_log_prob[1].len() != n {
            return Err("feature_log_prob rows must be non-empty and equal length".into());
        }
        ensure_finite("class_log_prior", &self.class_log_prior)?;
        for row in &self.feature_log_prob {
            ensure_finite("feature_log_prob", row)?;
        }
        Ok(())
    }

    /// Joint log-likelihood of each class for every row.
    fn joint_log_likelihood(&self, x: &FeatureMatrix) -> Result<Vec<[f32; 2]>, PredictError> {
        check_features(x, self.n_features())?;
        Ok(x.rows()
            .iter()
            .map(|row| {
                [
                    self.class_log_prior[0] + dot(row, &self.feature_log_prob[0]),
                    self.class_log_prior[1] + dot(row, &self.feature_log_prob[1]),
                ]
            })
            .collect())
    }
}

impl Classifier for MultinomialNb {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>, PredictError> {
        Ok(self
            .joint_log_likelihood(x)?
            .into_iter()
            // Ties go to the first class.
            .map(|[a, b]| if b > a { self.classes[1] } else { self.classes[0] })
            .collect())
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f32>, PredictError> {
        Ok(self
            .joint_log_likelihood(x)?
            .into_iter()
            .map(|[a, b]| spam_probability(&self.classes, sigmoid(b - a)))
            .collect())
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn kind(&self) -> &'static str {
        "multinomial_nb"
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("classifier", self.kind().to_string()),
            ("classes", describe_classes(&self.classes)),
            ("features", self.n_features().to_string()),
            (
                "class_prior",
                format!(
                    "{}={:.3} {}={:.3}",
                    self.classes[0],
                    self.class_log_prior[0].exp(),
                    self.classes[1],
                    self.class_log_prior[1].exp()
                ),
            ),
        ]
    }
}

// ── Linear decision function ──

/// Binary linear model: `intercept + coef · x > 0` selects the second class.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    #[serde(deserialize_with = "deserialize_classes")]
    classes: [Label; 2],
    coef: Vec<f32>,
    intercept: f32,
}

impl LinearModel {
    fn validate(&self) -> Result<(), String> {
        validate_classes(&self.classes)?;
        if self.coef.is_empty() {
            return Err("coef is empty".into());
        }
        ensure_finite("coef", &self.coef)?;
        ensure_finite("intercept", &[self.intercept])
    }

    fn decision_function(&self, x: &FeatureMatrix) -> Result<Vec<f32>, PredictError> {
        check_features(x, self.coef.len())?;
        Ok(x.dot_rows(&self.coef)
            .into_iter()
            .map(|d| d + self.intercept)
            .collect())
    }
}

impl Classifier for LinearModel {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>, PredictError> {
        Ok(self
            .decision_function(x)?
            .into_iter()
            .map(|d| if d > 0.0 { self.classes[1] } else { self.classes[0] })
            .collect())
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f32>, PredictError> {
        Ok(self
            .decision_function(x)?
            .into_iter()
            .map(|d| spam_probability(&self.classes, sigmoid(d)))
            .collect())
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn kind(&self) -> &'static str {
        "linear"
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("classifier", self.kind().to_string()),
            ("classes", describe_classes(&self.classes)),
            ("features", self.n_features().to_string()),
            ("intercept", format!("{:.4}", self.intercept)),
        ]
    }
}

// ── Helpers ──

fn deserialize_classes<'de, D>(deserializer: D) -> Result<[Label; 2], D::Error>
where
    D: Deserializer<'de>,
{
    let codes = <[i64; 2]>::deserialize(deserializer)?;
    let first = Label::try_from(codes[0]).map_err(serde::de::Error::custom)?;
    let second = Label::try_from(codes[1]).map_err(serde::de::Error::custom)?;
    Ok([first, second])
}

fn validate_classes(classes: &[Label; 2]) -> Result<(), String> {
    if classes[0] == classes[1] {
        return Err(format!("classes must be distinct, got {}", classes[0]));
    }
    Ok(())
}

fn describe_classes(classes: &[Label; 2]) -> String {
    format!(
        "[{}={}, {}={}]",
        classes[0].code(),
        classes[0],
        classes[1].code(),
        classes[1]
    )
}

fn ensure_finite(name: &str, values: &[f32]) -> Result<(), String> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(pos) => Err(format!("{name}[{pos}] is not finite")),
        None => Ok(()),
    }
}

fn check_features(x: &FeatureMatrix, expected: usize) -> Result<(), PredictError> {
    if x.n_features() != expected {
        return Err(PredictError::FeatureCountMismatch {
            expected,
            found: x.n_features(),
        });
    }
    Ok(())
}

/// Convert P(second class) into P(spam).
fn spam_probability(classes: &[Label; 2], p_second: f32) -> f32 {
    if classes[1].is_spam() {
        p_second
    } else {
        1.0 - p_second
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}
