//! Resort command implementation.
//!
//! Re-orders a saved chart report the way a "sort by key" / "sort by
//! measure" button would: the entries are re-sorted as they are, the
//! dataset is not reloaded and nothing is re-aggregated.

use super::models::ResortArgs;
use crate::output::{read_report, render_chart_summary, write_report, ChartReport};
use anyhow::{Context, Result};
use log::info;

/// Execute the resort command
pub fn execute_resort(args: ResortArgs) -> Result<ChartReport> {
    let report = read_report(&args.report)
        .with_context(|| format!("Failed to read report {}", args.report.display()))?;

    let mut state = report.to_state();
    state.resort(args.order);

    let resorted = ChartReport::from_state(&state, report.dataset.clone());
    let output = args.output.as_ref().unwrap_or(&args.report);

    write_report(&resorted, output).context("Failed to write re-sorted report")?;
    info!(
        "✓ Chart '{}' sorted by {} written to: {}",
        resorted.chart.name,
        args.order,
        output.display()
    );

    if args.print_summary {
        println!("\n{}", render_chart_summary(&state, usize::MAX));
    }

    Ok(resorted)
}
