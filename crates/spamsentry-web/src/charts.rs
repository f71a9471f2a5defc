//! Inline SVG bar charts for the insights page.
//!
//! Both charts draw the static [`ModelReport`]; nothing here depends on the
//! loaded artifacts.

use std::fmt::Write;

use spamsentry_core::ModelReport;

const WIDTH: u32 = 420;
const BAR_HEIGHT: u32 = 26;
const GAP: u32 = 12;
const LABEL_WIDTH: u32 = 110;
const VALUE_WIDTH: u32 = 60;

/// Horizontal bars of accuracy, precision, recall and F1 on a 0 to 100% scale.
pub fn score_chart(report: &ModelReport) -> String {
    let bars: Vec<(&str, f64, String)> = report
        .scores()
        .into_iter()
        .map(|(name, score)| (name, score, format!("{:.1}%", score * 100.0)))
        .collect();
    bar_chart("Model scores", "#007bff", &bars)
}

/// Horizontal bars of the evaluation counts, scaled to the largest cell.
pub fn confusion_chart(report: &ModelReport) -> String {
    let cells = report.confusion.cells();
    let max = cells.iter().map(|&(_, n)| n).max().unwrap_or(0).max(1);
    let bars: Vec<(&str, f64, String)> = cells
        .into_iter()
        .map(|(name, n)| (name, f64::from(n) / f64::from(max), n.to_string()))
        .collect();
    bar_chart("Evaluation counts", "#872341", &bars)
}

fn bar_chart(title: &str, color: &str, bars: &[(&str, f64, String)]) -> String {
    let track = WIDTH - LABEL_WIDTH - VALUE_WIDTH;
    let height = 30 + bars.len() as u32 * (BAR_HEIGHT + GAP);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" role="img" aria-label="{title}" viewBox="0 0 {WIDTH} {height}" width="{WIDTH}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = write!(
        svg,
        r#"<text x="0" y="18" font-size="15" font-weight="bold">{title}</text>"#
    );

    for (i, (label, fraction, value)) in bars.iter().enumerate() {
        let y = 30 + i as u32 * (BAR_HEIGHT + GAP);
        let text_y = y + BAR_HEIGHT / 2 + 5;
        let len = (fraction.clamp(0.0, 1.0) * f64::from(track)).round() as u32;
        let _ = write!(
            svg,
            r##"<text x="0" y="{text_y}" font-size="13">{label}</text><rect x="{LABEL_WIDTH}" y="{y}" width="{track}" height="{BAR_HEIGHT}" fill="#eee"/><rect class="bar" x="{LABEL_WIDTH}" y="{y}" width="{len}" height="{BAR_HEIGHT}" fill="{color}"/><text x="{value_x}" y="{text_y}" font-size="13">{value}</text>"##,
            value_x = LABEL_WIDTH + track + 8,
        );
    }

    svg.push_str("</svg>");
    svg
}
