//! Page copy shared by the web page and the CLI.

pub const APP_NAME: &str = "SpamSentry";
pub const TITLE: &str = "Spam-Sentry: Spam Email Detector";
pub const TAGLINE: &str = "Enter a message to check if it's Spam or Ham.";
pub const INPUT_PROMPT: &str = "Type your message below:";
pub const ANALYZE_BUTTON: &str = "Analyze Message";
pub const HOW_IT_WORKS: &str = "How does this work?";
pub const FOOTER: &str = "Made By Team SpamSentry";

/// Paragraphs for the "How does this work?" section.
pub fn explanation(model_name: &str, accuracy_percent: u32) -> [String; 3] {
    [
        "This model analyzes your message using Natural Language Processing (NLP) \
         and classifies it as Spam or Ham."
            .to_string(),
        format!("Spam-Sentry uses a {model_name} classifier for classification."),
        format!("This model has an accuracy of {accuracy_percent}%."),
    ]
}
