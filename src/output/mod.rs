//! Output writers for chart data.
//!
//! This module hands the ordered entries to whatever renders them:
//! - JSON chart reports (the payload a chart front-end binds to)
//! - Text summaries for the terminal

pub mod json;
pub mod schema;
pub mod summary;

// Re-export main functions
pub use json::{read_report, report_path, report_to_string, write_report};
pub use schema::{ChartReport, ReportEntry};
pub use summary::render_chart_summary;
