//! User-submitted messages and classification verdicts.

use crate::Label;

/// A message that is safe to classify.
///
/// Holds the text exactly as submitted. Construction fails for empty or
/// whitespace-only input, so a blank submission can never reach the
/// classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    /// Warning shown when the user submits without typing anything.
    pub const NO_INPUT_WARNING: &'static str =
        "Please enter a message before clicking the button!";

    /// Short machine-facing form of [`NO_INPUT_WARNING`](Self::NO_INPUT_WARNING).
    pub const NO_INPUT: &'static str = "no input provided";

    /// Accept `raw` if it contains anything besides whitespace.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a `Message` is never blank.
    pub fn is_empty(&self) -> bool {
        false
    }

}

/// Outcome of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub label: Label,
    /// Probability of spam in `[0, 1]`, when the classifier exposes one.
    pub spam_probability: Option<f32>,
}

impl Verdict {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            spam_probability: None,
        }
    }

    pub fn with_probability(label: Label, spam_probability: f32) -> Self {
        Self {
            label,
            spam_probability: Some(spam_probability.clamp(0.0, 1.0)),
        }
    }

    pub fn headline(&self) -> &'static str {
        self.label.headline()
    }

    /// Confidence in the chosen label, as a percentage.
    pub fn confidence_percent(&self) -> Option<f32> {
        self.spam_probability.map(|p| {
            let p = if self.label.is_spam() { p } else { 1.0 - p };
            p * 100.0
        })
    }
}
