//! Render command implementation.
//!
//! The render command:
//! 1. Resolves the chart specs (built-in or catalog file)
//! 2. Loads the dataset
//! 3. Runs the pipeline for every selected chart, then any requested re-sort
//! 4. Writes JSON reports, prints summaries, or prints the reports to stdout

use super::models::RenderArgs;
use crate::chart::{builtin_charts, find_chart, load_chart_specs, ChartSpec, ChartState};
use crate::dataset::{load_dataset, DatasetSource};
use crate::output::{
    render_chart_summary, report_path, report_to_string, write_report, ChartReport,
};
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// Returns the built chart states in catalog order.
///
/// # Errors
/// * Unknown chart names or an invalid catalog file
/// * Dataset load failures (reported once, no chart is produced)
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<Vec<ChartState>> {
    let start_time = Instant::now();

    // Step 1: Resolve chart specs
    info!("Step 1/4: Resolving charts...");
    let specs = select_charts(&args)?;
    debug!(
        "Selected charts: {}",
        specs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
    );

    // Step 2: Load dataset
    info!("Step 2/4: Loading dataset...");
    let source = DatasetSource::parse(&args.dataset).context("Invalid dataset location")?;
    let rows = match load_dataset(&source) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Error loading or parsing data from {}: {}", source, e);
            return Err(e).context("Failed to load dataset");
        }
    };

    // Step 3: Build charts
    info!("Step 3/4: Building {} charts...", specs.len());
    let mut states: Vec<ChartState> = specs
        .into_iter()
        .map(|spec| ChartState::build(spec, &rows))
        .collect();

    if let Some(order) = args.sort {
        info!("Re-sorting all charts by {}", order);
        for state in &mut states {
            state.resort(order);
        }
    }

    // Step 4: Emit
    info!("Step 4/4: Writing output...");
    if let Some(dir) = &args.output_dir {
        for state in &states {
            let report = ChartReport::from_state(state, source.to_string());
            let path = report_path(dir, &state.spec().name);
            write_report(&report, &path)
                .with_context(|| format!("Failed to write report for '{}'", state.spec().name))?;
            info!("✓ Chart '{}' written to: {}", state.spec().name, path.display());
        }
    }

    if args.print_summary {
        for state in &states {
            println!("\n{}", render_chart_summary(state, args.max_lines));
        }
    } else if args.output_dir.is_none() {
        // No file and no table requested: reports go to stdout
        for state in &states {
            let report = ChartReport::from_state(state, source.to_string());
            println!("{}", report_to_string(&report)?);
        }
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(states)
}

/// Pick the requested charts from the active catalog
///
/// **Private** - internal helper for execute_render
fn select_charts(args: &RenderArgs) -> Result<Vec<ChartSpec>> {
    let catalog = match &args.catalog {
        Some(path) => load_chart_specs(path)
            .with_context(|| format!("Failed to load chart catalog {}", path.display()))?,
        None => builtin_charts(),
    };

    if args.charts.is_empty() {
        return Ok(catalog);
    }

    args.charts
        .iter()
        .map(|name| find_chart(&catalog, name).cloned().map_err(anyhow::Error::from))
        .collect()
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.dataset.trim().is_empty() {
        anyhow::bail!("Dataset location cannot be empty");
    }

    DatasetSource::parse(&args.dataset)?;

    if args.max_lines == 0 {
        anyhow::bail!("max_lines must be greater than 0");
    }

    if args.charts.iter().any(|name| name.trim().is_empty()) {
        anyhow::bail!("Chart names cannot be empty");
    }

    Ok(())
}
