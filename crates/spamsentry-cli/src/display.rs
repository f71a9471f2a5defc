//! Terminal output for verdicts and artifact summaries.

use spamsentry_ai::ServiceSummary;
use spamsentry_core::{Message, Verdict, copy};
use spamsentry_web::ClassifyResponse;

// ── Verdicts ──

/// Plain-text line for a verdict: headline plus confidence when known.
pub fn verdict_line(verdict: &Verdict) -> String {
    match verdict.confidence_percent() {
        Some(c) => format!("{} ({c:.1}% confidence)", verdict.headline()),
        None => verdict.headline().to_string(),
    }
}

pub fn print_verdict(verdict: &Verdict) {
    println!("{}", verdict_line(verdict));
}

pub fn print_remote_verdict(resp: &ClassifyResponse) {
    let verdict = match resp.spam_probability {
        Some(p) => Verdict::with_probability(resp.label, p),
        None => Verdict::new(resp.label),
    };
    println!("{}", verdict_line(&verdict));
}

pub fn print_no_input() {
    eprintln!("{}", Message::NO_INPUT_WARNING);
}

// ── Artifact card ──

/// Print the loaded artifacts as a vertical card.
pub fn print_summary_card(summary: &ServiceSummary) {
    println!("=== {} artifacts ===", copy::APP_NAME);
    println!();
    print_section("Service", &overview(summary));
    print_section("Vectorizer", &summary.vectorizer);
    print_section("Classifier", &summary.classifier);
}

fn overview(summary: &ServiceSummary) -> Vec<(&'static str, String)> {
    vec![
        ("classifier", summary.classifier_kind.to_string()),
        ("features", summary.n_features.to_string()),
    ]
}

fn print_section(header: &str, props: &[(&'static str, String)]) {
    if props.is_empty() {
        return;
    }
    println!("{header}");
    for (name, value) in props {
        println!("  {:<26} {}", name, value);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamsentry_core::Label;

    #[test]
    fn verdict_line_includes_confidence() {
        let line = verdict_line(&Verdict::with_probability(Label::Spam, 0.75));
        assert_eq!(line, "Spam Detected (75.0% confidence)");
    }

    #[test]
    fn overview_lists_kind_and_feature_count() {
        let summary = ServiceSummary {
            n_features: 68,
            classifier_kind: "multinomial_nb",
            vectorizer: vec![],
            classifier: vec![],
        };
        assert_eq!(
            overview(&summary),
            vec![
                ("classifier", "multinomial_nb".to_string()),
                ("features", "68".to_string()),
            ]
        );
    }

    #[test]
    fn verdict_line_without_probability() {
        assert_eq!(
            verdict_line(&Verdict::new(Label::Ham)),
            "Ham / Safe Message"
        );
    }
}
