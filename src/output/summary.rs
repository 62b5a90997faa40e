//! Terminal summary of a chart.
//!
//! A plain-text stand-in for the rendering surface: one row per entry in
//! the chart's current order with a proportional bar.

use crate::aggregator::{summarize, AggregateEntry};
use crate::chart::ChartState;
use crate::dataset::format_number;

const LABEL_WIDTH: usize = 28;
const BAR_WIDTH: usize = 30;

/// Render a chart as a text table
pub fn render_chart_summary(state: &ChartState, max_lines: usize) -> String {
    let spec = state.spec();
    let entries = state.entries();
    let mut lines = Vec::new();

    let order = state
        .order()
        .map(|o| o.to_string())
        .unwrap_or_else(|| "first seen".to_string());

    lines.push(format!("  📊 {} [{} | sorted by {}]", spec.title, spec.kind, order));
    lines.push(format!(
        "  ┏{}┳{}┳{}┳{}┓",
        "━".repeat(LABEL_WIDTH + 2),
        "━".repeat(18),
        "━".repeat(9),
        "━".repeat(BAR_WIDTH + 2)
    ));
    lines.push(format!(
        "  ┃ {:<w$} ┃ {:^16} ┃ {:^7} ┃ {:<b$} ┃",
        spec.key.field().to_string(),
        spec.measure.name(),
        "%",
        "",
        w = LABEL_WIDTH,
        b = BAR_WIDTH
    ));
    lines.push(format!(
        "  ┣{}╋{}╋{}╋{}┫",
        "━".repeat(LABEL_WIDTH + 2),
        "━".repeat(18),
        "━".repeat(9),
        "━".repeat(BAR_WIDTH + 2)
    ));

    let total = state.total();
    let max = entries
        .iter()
        .map(|e| e.measure)
        .fold(0.0_f64, f64::max);

    for entry in entries.iter().take(max_lines) {
        lines.push(render_row(entry, total, max));
    }

    if entries.len() > max_lines {
        lines.push(format!("  ┃ ... {} more", entries.len() - max_lines));
    }

    lines.push(format!(
        "  ┗{}┻{}┻{}┻{}┛",
        "━".repeat(LABEL_WIDTH + 2),
        "━".repeat(18),
        "━".repeat(9),
        "━".repeat(BAR_WIDTH + 2)
    ));
    lines.push(format!("  {}", summarize(entries).summary()));

    lines.join("\n")
}

fn render_row(entry: &AggregateEntry, total: f64, max: f64) -> String {
    let percentage = if total > 0.0 {
        entry.measure / total * 100.0
    } else {
        0.0
    };

    let bar_len = if max > 0.0 {
        ((entry.measure / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };

    format!(
        "  ┃ {:<w$} ┃ {:>16} ┃ {:>6.1}% ┃ {:<b$} ┃",
        truncate_label(&entry.key.label()),
        format_number(entry.measure),
        percentage,
        "█".repeat(bar_len.min(BAR_WIDTH)),
        w = LABEL_WIDTH,
        b = BAR_WIDTH
    )
}

/// Shorten long labels (artist lists) to the column width
fn truncate_label(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let head: String = label.chars().take(LABEL_WIDTH - 3).collect();
        format!("{}...", head)
    } else if label.is_empty() {
        "(empty)".to_string()
    } else {
        label.to_string()
    }
}
