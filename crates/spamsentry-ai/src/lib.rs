//! Inference layer: pre-fitted text vectorizer and spam classifier loaded from JSON artifacts.

pub mod artifact;
pub mod classifier;
mod error;
mod matrix;
mod service;
pub mod vectorizer;

pub use artifact::{ArtifactPaths, FORMAT_VERSION};
pub use classifier::{Classifier, ClassifierModel, LinearModel, MultinomialNb};
pub use error::{ArtifactError, InferenceError, PredictError, TransformError};
pub use matrix::{FeatureMatrix, SparseRow};
pub use service::{InferenceService, ServiceSummary};
pub use vectorizer::{Norm, TfidfVectorizer, Vectorizer};
