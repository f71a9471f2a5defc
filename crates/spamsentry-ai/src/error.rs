use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a vectorizer or classifier artifact at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {path} has format version {found}, expected {expected}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("invalid artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error(
        "vectorizer produces {vectorizer} features but classifier expects {classifier}"
    )]
    DimensionMismatch { vectorizer: usize, classifier: usize },
}

/// The vectorizer rejected its input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("cannot transform an empty batch")]
    EmptyBatch,
}

/// The classifier rejected a feature matrix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("feature matrix has {found} columns, model expects {expected}")]
    FeatureCountMismatch { expected: usize, found: usize },
}

/// Failure while classifying a single message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("prediction failed: {0}")]
    Predict(#[from] PredictError),

    #[error("classifier returned no label")]
    EmptyPrediction,
}
