//! Shared SpamSentry types: labels, messages, verdicts and the demo model report.

pub mod copy;
pub mod label;
pub mod message;
pub mod report;

pub use label::{Label, UnknownLabel};
pub use message::{Message, Verdict};
pub use report::{ConfusionMatrix, ModelReport};
