//! Reading vectorizer and classifier artifacts from disk.
//!
//! Both artifacts are JSON documents carrying a top-level `format_version`.
//! The version is checked before the body is decoded so that an artifact from
//! a newer exporter reports a version mismatch instead of a parse error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::{ArtifactError, ClassifierModel, TfidfVectorizer, Vectorizer};

/// Artifact format understood by this build.
pub const FORMAT_VERSION: u32 = 1;

pub const DEFAULT_VECTORIZER_FILE: &str = "vectorizer.json";
pub const DEFAULT_CLASSIFIER_FILE: &str = "spamsentry.json";

/// Locations of the two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub classifier: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            vectorizer: PathBuf::from(DEFAULT_VECTORIZER_FILE),
            classifier: PathBuf::from(DEFAULT_CLASSIFIER_FILE),
        }
    }
}

impl ArtifactPaths {
    pub fn new(vectorizer: impl Into<PathBuf>, classifier: impl Into<PathBuf>) -> Self {
        Self {
            vectorizer: vectorizer.into(),
            classifier: classifier.into(),
        }
    }

    /// Both artifacts under `dir`, using the default file names.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(DEFAULT_VECTORIZER_FILE),
            dir.join(DEFAULT_CLASSIFIER_FILE),
        )
    }
}

#[derive(Deserialize)]
struct ClassifierArtifact {
    model: ClassifierModel,
}

/// Load and validate a vectorizer artifact.
pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer, ArtifactError> {
    let vectorizer: TfidfVectorizer = read_versioned(path)?;
    vectorizer.validate().map_err(|reason| invalid(path, reason))?;
    info!(
        path = %path.display(),
        features = vectorizer.n_features(),
        "loaded vectorizer artifact"
    );
    Ok(vectorizer)
}

/// Load and validate a classifier artifact.
pub fn load_classifier(path: &Path) -> Result<ClassifierModel, ArtifactError> {
    let artifact: ClassifierArtifact = read_versioned(path)?;
    let model = artifact.model;
    model.validate().map_err(|reason| invalid(path, reason))?;
    info!(path = %path.display(), "loaded classifier artifact");
    Ok(model)
}

fn read_versioned<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let malformed = |source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(malformed)?;
    let found = value
        .get("format_version")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| invalid(path, "missing or non-integer format_version".into()))?;
    if found != u64::from(FORMAT_VERSION) {
        return Err(ArtifactError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: u32::try_from(found).unwrap_or(u32::MAX),
            expected: FORMAT_VERSION,
        });
    }

    serde_json::from_value(value).map_err(malformed)
}

fn invalid(path: &Path, reason: String) -> ArtifactError {
    ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason,
    }
}
