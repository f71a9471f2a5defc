//! Bag-of-words text vectorizer with optional TF-IDF weighting.
//!
//! Reproduces the transform half of a fitted count/TF-IDF vectorizer:
//! lowercase, split into word tokens of two or more characters, drop stop
//! words, build n-grams, count vocabulary hits, then weight and normalise.
//! Fitting is done elsewhere; the vocabulary and idf weights arrive in the
//! artifact.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::{FeatureMatrix, SparseRow, TransformError};

/// Text-to-features capability of a fitted vectorizer.
pub trait Vectorizer: Send + Sync {
    /// Transform each text into one sparse row of a matrix.
    fn transform(&self, texts: &[&str]) -> Result<FeatureMatrix, TransformError>;

    /// Number of columns every output row has.
    fn n_features(&self) -> usize;

    /// `(property, value)` pairs for summaries.
    fn describe(&self) -> Vec<(&'static str, String)>;
}

/// Row normalisation applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

impl Norm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
        }
    }
}

/// A fitted count or TF-IDF vectorizer.
///
/// Without `idf` this behaves like a plain count vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    binary: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Option<Norm>,
    #[serde(default)]
    stop_words: HashSet<String>,
    vocabulary: HashMap<String, usize>,
    #[serde(default)]
    idf: Option<Vec<f32>>,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl TfidfVectorizer {
    /// Check internal consistency of a deserialized vectorizer.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.vocabulary.len();
        if n == 0 {
            return Err("vocabulary is empty".into());
        }

        let mut seen = vec![false; n];
        for (term, &idx) in &self.vocabulary {
            if idx >= n {
                return Err(format!(
                    "term {term:?} has index {idx}, vocabulary size is {n}"
                ));
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(format!("index {idx} is used by more than one term"));
            }
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }

        if let Some(idf) = &self.idf {
            if idf.len() != n {
                return Err(format!(
                    "idf has {} weights, vocabulary size is {n}",
                    idf.len()
                ));
            }
            if let Some(pos) = idf.iter().position(|w| !w.is_finite()) {
                return Err(format!("idf weight {pos} is not finite"));
            }
        }

        Ok(())
    }

    /// Split a document into the terms looked up in the vocabulary.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let doc = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = tokenize(&doc)
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| t.to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }

    fn transform_one(&self, text: &str) -> SparseRow {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseRow = counts.into_iter().collect();
        row.sort_by_key(|&(idx, _)| idx);

        for (idx, value) in row.iter_mut() {
            if self.binary {
                *value = 1.0;
            } else if self.sublinear_tf {
                *value = 1.0 + value.ln();
            }
            if let Some(idf) = &self.idf {
                *value *= idf[*idx];
            }
        }

        if let Some(norm) = self.norm {
            normalize(&mut row, norm);
        }
        row
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, texts: &[&str]) -> Result<FeatureMatrix, TransformError> {
        if texts.is_empty() {
            return Err(TransformError::EmptyBatch);
        }
        let rows = texts.iter().map(|t| self.transform_one(t)).collect();
        Ok(FeatureMatrix::new(rows, self.n_features()))
    }

    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        let weighting = if self.idf.is_some() { "tf-idf" } else { "counts" };
        vec![
            ("vectorizer", weighting.to_string()),
            ("vocabulary", self.vocabulary.len().to_string()),
            (
                "ngram_range",
                format!("{}..={}", self.ngram_range.0, self.ngram_range.1),
            ),
            ("lowercase", self.lowercase.to_string()),
            ("binary", self.binary.to_string()),
            ("sublinear_tf", self.sublinear_tf.to_string()),
            (
                "norm",
                self.norm.map_or("none", Norm::as_str).to_string(),
            ),
            ("stop_words", self.stop_words.len().to_string()),
        ]
    }
}

/// Word tokens: maximal runs of alphanumerics or `_`, at least two characters long.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().nth(1).is_some())
}

fn normalize(row: &mut [(usize, f32)], norm: Norm) {
    let total: f32 = match norm {
        Norm::L1 => row.iter().map(|(_, v)| v.abs()).sum(),
        Norm::L2 => row.iter().map(|(_, v)| v * v).sum::<f32>().sqrt(),
    };
    if total > 0.0 {
        for (_, v) in row.iter_mut() {
            *v /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vectorizer(value: serde_json::Value) -> TfidfVectorizer {
        let v: TfidfVectorizer = serde_json::from_value(value).unwrap();
        v.validate().unwrap();
        v
    }

    fn counts() -> TfidfVectorizer {
        vectorizer(json!({
            "vocabulary": { "free": 0, "win": 1, "lunch": 2, "click here": 3 }
        }))
    }

    #[test]
    fn tokenize_drops_single_characters_and_punctuation() {
        let tokens: Vec<&str> = tokenize("Let's WIN a free_prize!!! now").collect();
        assert_eq!(tokens, vec!["Let", "WIN", "free_prize", "now"]);
    }

    #[test]
    fn tokenize_handles_unicode_words() {
        let tokens: Vec<&str> = tokenize("café über 42").collect();
        assert_eq!(tokens, vec!["café", "über", "42"]);
    }

    #[test]
    fn defaults_lowercase_and_count() {
        let v = counts();
        let m = v.transform(&["WIN win Free LUNCH?"]).unwrap();
        assert_eq!(m.n_rows(), 1);
        assert_eq!(m.n_features(), 4);
        assert_eq!(m.row(0).unwrap(), &vec![(0, 1.0), (1, 2.0), (2, 1.0)]);
    }

    #[test]
    fn out_of_vocabulary_text_gives_empty_row() {
        let m = counts().transform(&["nothing matches"]).unwrap();
        assert!(m.row(0).unwrap().is_empty());
    }

    #[test]
    fn bigrams_are_space_joined() {
        let v = vectorizer(json!({
            "ngram_range": [1, 2],
            "vocabulary": { "click": 0, "click here": 1 }
        }));
        let m = v.transform(&["Click HERE now"]).unwrap();
        assert_eq!(m.row(0).unwrap(), &vec![(0, 1.0), (1, 1.0)]);
    }

    #[test]
    fn stop_words_are_removed_before_ngrams() {
        let v = vectorizer(json!({
            "ngram_range": [2, 2],
            "stop_words": ["the"],
            "vocabulary": { "win prize": 0 }
        }));
        let m = v.transform(&["win the prize"]).unwrap();
        assert_eq!(m.row(0).unwrap(), &vec![(0, 1.0)]);
    }

    #[test]
    fn binary_clamps_counts() {
        let v = vectorizer(json!({ "binary": true, "vocabulary": { "win": 0 } }));
        let m = v.transform(&["win win win"]).unwrap();
        assert_eq!(m.row(0).unwrap(), &vec![(0, 1.0)]);
    }

    #[test]
    fn sublinear_tf_uses_log_counts() {
        let v = vectorizer(json!({ "sublinear_tf": true, "vocabulary": { "win": 0 } }));
        let m = v.transform(&["win win"]).unwrap();
        let value = m.row(0).unwrap()[0].1;
        assert!((value - (1.0 + 2.0f32.ln())).abs() < 1e-6);
    }

    #[test]
    fn idf_and_l2_norm() {
        let v = vectorizer(json!({
            "norm": "l2",
            "vocabulary": { "free": 0, "win": 1 },
            "idf": [3.0, 4.0]
        }));
        let m = v.transform(&["free win"]).unwrap();
        let row = m.row(0).unwrap();
        assert!((row[0].1 - 0.6).abs() < 1e-6);
        assert!((row[1].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn l1_norm_sums_to_one() {
        let v = vectorizer(json!({
            "norm": "l1",
            "vocabulary": { "free": 0, "win": 1 }
        }));
        let m = v.transform(&["free win win win"]).unwrap();
        let total: f32 = m.row(0).unwrap().iter().map(|(_, v)| v).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_row_survives_normalisation() {
        let v = vectorizer(json!({ "norm": "l2", "vocabulary": { "win": 0 } }));
        let m = v.transform(&["nothing"]).unwrap();
        assert!(m.row(0).unwrap().is_empty());
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(counts().transform(&[]), Err(TransformError::EmptyBatch));
    }

    #[test]
    fn empty_string_still_transforms() {
        let m = counts().transform(&[""]).unwrap();
        assert_eq!(m.n_rows(), 1);
    }

    #[test]
    fn one_row_per_text() {
        let m = counts().transform(&["win", "lunch", "free"]).unwrap();
        assert_eq!(m.n_rows(), 3);
    }

    #[test]
    fn validate_rejects_sparse_indices() {
        let v: TfidfVectorizer =
            serde_json::from_value(json!({ "vocabulary": { "a": 0, "b": 5 } })).unwrap();
        assert!(v.validate().unwrap_err().contains("index 5"));
    }

    #[test]
    fn validate_rejects_duplicate_indices() {
        let v: TfidfVectorizer =
            serde_json::from_value(json!({ "vocabulary": { "aa": 0, "bb": 0 } })).unwrap();
        assert!(v.validate().is_err());
    }

    #[test]
    fn validate_rejects_idf_length_mismatch() {
        let v: TfidfVectorizer = serde_json::from_value(json!({
            "vocabulary": { "aa": 0, "bb": 1 },
            "idf": [1.0]
        }))
        .unwrap();
        assert!(v.validate().unwrap_err().contains("idf"));
    }

    #[test]
    fn validate_rejects_bad_ngram_range() {
        let v: TfidfVectorizer = serde_json::from_value(json!({
            "ngram_range": [2, 1],
            "vocabulary": { "aa": 0 }
        }))
        .unwrap();
        assert!(v.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_vocabulary() {
        let v: TfidfVectorizer = serde_json::from_value(json!({ "vocabulary": {} })).unwrap();
        assert!(v.validate().is_err());
    }

    #[test]
    fn describe_reports_weighting() {
        let props = counts().describe();
        assert!(props.contains(&("vectorizer", "counts".to_string())));
        assert!(props.contains(&("vocabulary", "4".to_string())));
    }
}
