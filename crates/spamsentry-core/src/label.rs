//! Binary message labels and their display mapping.
//!
//! Label codes follow the classifier artifacts: `1` is spam, `0` is ham.
//! The headline for each label is fixed here so the mapping can never invert
//! between the page, the API, and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classifier output code that is neither spam nor ham.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown label code {0}: expected 0 (ham) or 1 (spam)")]
pub struct UnknownLabel(pub i64);

/// Class of a classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate message, code 0.
    Ham,
    /// Unwanted or malicious message, code 1.
    Spam,
}

impl Label {
    pub const HAM_HEADLINE: &'static str = "Ham / Safe Message";
    pub const SPAM_HEADLINE: &'static str = "Spam Detected";

    /// Map a classifier output code to a label.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Ham),
            1 => Some(Self::Spam),
            _ => None,
        }
    }

    /// The numeric code used in artifacts and API responses.
    pub fn code(self) -> i64 {
        match self {
            Self::Ham => 0,
            Self::Spam => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ham => "ham",
            Self::Spam => "spam",
        }
    }

    /// Human-readable result shown to the user.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Ham => Self::HAM_HEADLINE,
            Self::Spam => Self::SPAM_HEADLINE,
        }
    }

    /// Whether the result deserves the celebratory decoration.
    pub fn celebrates(self) -> bool {
        matches!(self, Self::Ham)
    }

    pub fn is_spam(self) -> bool {
        matches!(self, Self::Spam)
    }
}

impl TryFrom<i64> for Label {
    type Error = UnknownLabel;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownLabel(code))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
