//! JSON chart report writer.
//!
//! Writes ChartReport structs to JSON files with proper formatting.

use super::schema::ChartReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = ChartReport::from_state(&state, "spotify-2023.csv");
/// write_report(&report, "charts/year-counts.json")?;
/// ```
pub fn write_report(report: &ChartReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing chart '{}' to: {}", report.chart.name, output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    debug!("Report written ({} bytes)", calculate_file_size(output_path));

    Ok(())
}

/// Path of a chart's report inside an output directory
pub fn report_path(output_dir: impl AsRef<Path>, chart_name: &str) -> PathBuf {
    output_dir.as_ref().join(format!("{}.json", chart_name))
}

/// Serialize a report for stdout or in-memory use
pub fn report_to_string(report: &ChartReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Read a report from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ChartReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: ChartReport =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, chart {}",
        report.version, report.chart.name
    );

    Ok(report)
}

/// Validate that output path is writable
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{KeySpec, Measure, SortOrder};
    use crate::chart::{ChartKind, ChartSpec, ChartState};
    use crate::dataset::{Field, Track};
    use tempfile::NamedTempFile;

    fn create_test_report() -> ChartReport {
        let rows = vec![
            Track { mode: "Major".into(), ..Default::default() },
            Track { mode: "Minor".into(), ..Default::default() },
            Track { mode: "Major".into(), ..Default::default() },
            Track { mode: "Major".into(), ..Default::default() },
        ];
        let spec = ChartSpec::new(
            "mode-share",
            "Modes",
            ChartKind::Pie,
            KeySpec::Field(Field::Mode),
            Measure::Count,
        )
        .sorted_by(SortOrder::Measure);

        ChartReport::from_state(&ChartState::build(spec, &rows), "test.csv")
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();

        write_report(&report, temp_file.path()).unwrap();
        let loaded = read_report(temp_file.path()).unwrap();

        assert_eq!(loaded, report);
        assert_eq!(loaded.entries[0].label, "Major");
        assert_eq!(loaded.entries[0].measure, 3.0);
        assert_eq!(loaded.entries[0].percentage, Some(75.0));
    }

    #[test]
    fn test_report_to_string_parses_back() {
        let report = create_test_report();
        let text = report_to_string(&report).unwrap();

        assert!(text.contains("\"mode-share\""));
        let parsed: ChartReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = report_path(temp_dir.path().join("nested/dirs"), "mode-share");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
        assert!(nested_path.ends_with("nested/dirs/mode-share.json"));
    }

    #[test]
    fn test_read_report_missing() {
        assert!(read_report("/no/such/report.json").is_err());
    }
}
