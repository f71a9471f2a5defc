//! HTML rendering for the classification page.

use std::fmt::Write;

use spamsentry_core::{Message, ModelReport, Verdict, copy};

use crate::charts;

/// Which flavour of the page to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Form and result only.
    Standard,
    /// Form, result, and the two static report charts.
    Insights,
}

impl Variant {
    pub fn path(self) -> &'static str {
        match self {
            Self::Standard => "/",
            Self::Insights => "/insights",
        }
    }
}

/// What to show under the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing submitted yet.
    Blank,
    /// Submitted with no text.
    NoInput,
    Verdict(Verdict),
    Failed(String),
}

const STYLE: &str = r#"
body { background-color: #872341; font-family: sans-serif; margin: 0; }
main { max-width: 760px; margin: 2rem auto; background: #fff; border-radius: 12px; padding: 1.5rem 2rem; }
textarea { width: 100%; height: 150px; border-radius: 8px; font-size: 16px; padding: 10px; box-sizing: border-box; }
button { background-color: #007bff; color: white; border: 0; border-radius: 8px; font-size: 18px; padding: 10px 20px; margin-top: .75rem; cursor: pointer; }
.result { font-size: 18px; margin-top: 1.5rem; }
.spam { color: #b00020; }
.ham { color: #1b7f3a; }
.warning { background: #fff4ce; border-left: 4px solid #e0a800; padding: .75rem 1rem; margin-top: 1.5rem; }
.error { background: #fde7e9; border-left: 4px solid #b00020; padding: .75rem 1rem; margin-top: 1.5rem; }
.balloons span { display: inline-block; font-size: 32px; animation: rise 3s ease-in forwards; }
@keyframes rise { from { transform: translateY(40px); opacity: 1; } to { transform: translateY(-120px); opacity: 0; } }
.charts { display: flex; flex-wrap: wrap; gap: 1.5rem; margin-top: 2rem; }
footer { margin-top: 2rem; border-top: 1px solid #ddd; padding-top: 1rem; color: #555; }
"#;

/// Render the full page.
pub fn render(variant: Variant, input: &str, outcome: &Outcome, report: &ModelReport) -> String {
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{app}</title><style>{STYLE}</style></head><body><main>",
        app = copy::APP_NAME,
    );

    let _ = write!(
        html,
        "<h1>{title}</h1><p>{tagline}</p>",
        title = copy::TITLE,
        tagline = copy::TAGLINE,
    );

    let _ = write!(
        html,
        "<form method=\"post\" action=\"{action}\">\
         <label for=\"message\">{prompt}</label>\
         <textarea id=\"message\" name=\"message\">\n{input}</textarea>\
         <button type=\"submit\">{button}</button></form>",
        action = variant.path(),
        prompt = copy::INPUT_PROMPT,
        input = escape(input),
        button = copy::ANALYZE_BUTTON,
    );

    html.push_str("<details><summary>");
    html.push_str(copy::HOW_IT_WORKS);
    html.push_str("</summary>");
    for paragraph in copy::explanation(report.model_name, report.accuracy_percent()) {
        let _ = write!(html, "<p>{}</p>", escape(&paragraph));
    }
    html.push_str("</details>");

    render_outcome(&mut html, outcome);

    if variant == Variant::Insights {
        html.push_str("<section class=\"charts\">");
        html.push_str(&charts::score_chart(report));
        html.push_str(&charts::confusion_chart(report));
        html.push_str("</section>");
    }

    let _ = write!(
        html,
        "<footer>{footer}</footer></main></body></html>",
        footer = copy::FOOTER
    );
    html
}

fn render_outcome(html: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Blank => {}
        Outcome::NoInput => {
            let _ = write!(
                html,
                "<div class=\"warning\" role=\"alert\">{}</div>",
                Message::NO_INPUT_WARNING
            );
        }
        Outcome::Verdict(verdict) => {
            let class = verdict.label.as_str();
            let _ = write!(
                html,
                "<section class=\"result\"><h2>Result:</h2>\
                 <p class=\"{class}\" data-label=\"{class}\"><strong>{headline}</strong></p>",
                headline = verdict.headline(),
            );
            if let Some(confidence) = verdict.confidence_percent() {
                let _ = write!(html, "<p>Confidence: {confidence:.1}%</p>");
            }
            if verdict.label.celebrates() {
                html.push_str("<div class=\"balloons\" aria-hidden=\"true\">");
                for _ in 0..5 {
                    html.push_str("<span>\u{1F388}</span>");
                }
                html.push_str("</div>");
            }
            html.push_str("</section>");
        }
        Outcome::Failed(reason) => {
            let _ = write!(
                html,
                "<div class=\"error\" role=\"alert\">Could not analyze the message: {}</div>",
                escape(reason)
            );
        }
    }
}

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
