use crate::chart::{builtin_charts, load_chart_specs};
use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a chart report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;
    report.chart.validate()?;

    let sum: f64 = report.entries.iter().map(|e| e.measure).sum();
    if (sum - report.total).abs() > 1e-6 * report.total.abs().max(1.0) {
        anyhow::bail!(
            "Entry measures sum to {} but report total is {}",
            sum,
            report.total
        );
    }

    println!("✓ Valid chart report");
    println!("  Version: {}", report.version);
    println!("  Chart: {} ({})", report.chart.name, report.chart.kind);
    println!("  Dataset: {}", report.dataset);
    println!(
        "  Sort: {}",
        report
            .sort
            .map(|s| s.to_string())
            .unwrap_or_else(|| "first seen".to_string())
    );
    println!("  Entries: {}", report.entries.len());
    println!("  Total: {}", report.total);

    Ok(())
}

/// List the charts of the active catalog
pub fn list_charts(catalog: Option<PathBuf>) -> Result<()> {
    let charts = match catalog {
        Some(path) => load_chart_specs(path)?,
        None => builtin_charts(),
    };

    println!("Available charts:");
    for chart in &charts {
        let mut notes = Vec::new();
        if let Some(rebucket) = &chart.rebucket {
            notes.push(format!("merge < {}", rebucket.threshold));
        }
        if let Some(cap) = &chart.key_cap {
            notes.push(format!("> {} as '{}'", cap.cutoff, cap.label));
        }
        if let Some(limit) = chart.limit {
            notes.push(format!("top {}", limit));
        }

        println!(
            "  {:<22} {:<5} {} by {}{}",
            chart.name,
            chart.kind.to_string(),
            chart.measure.name(),
            chart.key.field(),
            if notes.is_empty() {
                String::new()
            } else {
                format!(" [{}]", notes.join(", "))
            }
        );
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Spotify Charts v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Aggregation and binning pipeline for exploratory streaming charts.");
}
