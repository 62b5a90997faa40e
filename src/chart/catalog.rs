//! Built-in chart presets and catalog files.
//!
//! A catalog file is TOML with one `[[chart]]` table per chart:
//!
//! ```toml
//! [[chart]]
//! name = "year-counts"
//! title = "Tracks per release year"
//! kind = "bar"
//! key = { field = "released_year" }
//! measure = "count"
//! rebucket = { threshold = 36 }
//! initial_sort = "key"
//! ```

use super::spec::{ChartKind, ChartSpec};
use crate::aggregator::{KeySpec, Measure, RowFilter, SortOrder};
use crate::dataset::Field;
use crate::utils::config::{
    ARTIST_COUNT_CAP_LABEL, ARTIST_COUNT_CUTOFF, BPM_BIN_WIDTH, MONTH_COUNT_THRESHOLD,
    STREAMS_THRESHOLD, TOP_ARTISTS, YEAR_COUNT_THRESHOLD,
};
use crate::utils::error::CatalogError;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    chart: Vec<ChartSpec>,
}

/// The charts of the Spotify 2023 exploration
pub fn builtin_charts() -> Vec<ChartSpec> {
    let major = || RowFilter::Equals {
        field: Field::Mode,
        value: "Major".to_string(),
    };
    let streams = Measure::Sum(Field::Streams);

    vec![
        ChartSpec::new(
            "key-counts",
            "Songs per key",
            ChartKind::Bar,
            KeySpec::Field(Field::Key),
            Measure::Count,
        ),
        ChartSpec::new(
            "mode-share",
            "Share of major and minor songs",
            ChartKind::Pie,
            KeySpec::Field(Field::Mode),
            Measure::Count,
        ),
        ChartSpec::new(
            "monthly-counts",
            "Songs released per month",
            ChartKind::Line,
            KeySpec::Field(Field::ReleasedMonth),
            Measure::Count,
        )
        .sorted_by(SortOrder::Key),
        ChartSpec::new(
            "top-keys",
            "Songs per key, most common first",
            ChartKind::Bar,
            KeySpec::Field(Field::Key),
            Measure::Count,
        )
        .with_filter(RowFilter::NotEmpty { field: Field::Key })
        .sorted_by(SortOrder::Measure),
        ChartSpec::new(
            "major-month-counts",
            "Major-mode songs per release month",
            ChartKind::Bar,
            KeySpec::Field(Field::ReleasedMonth),
            Measure::Count,
        )
        .with_filter(major())
        .with_rebucket(MONTH_COUNT_THRESHOLD)
        .sorted_by(SortOrder::Key),
        ChartSpec::new(
            "major-month-streams",
            "Major-mode streams per release month",
            ChartKind::Bar,
            KeySpec::Field(Field::ReleasedMonth),
            streams,
        )
        .with_filter(major())
        .with_rebucket(STREAMS_THRESHOLD)
        .sorted_by(SortOrder::Key),
        ChartSpec::new(
            "year-counts",
            "Tracks per release year",
            ChartKind::Bar,
            KeySpec::Field(Field::ReleasedYear),
            Measure::Count,
        )
        .with_rebucket(YEAR_COUNT_THRESHOLD)
        .sorted_by(SortOrder::Key),
        ChartSpec::new(
            "year-streams",
            "Streams per release year",
            ChartKind::Bar,
            KeySpec::Field(Field::ReleasedYear),
            streams,
        )
        .with_rebucket(STREAMS_THRESHOLD)
        .sorted_by(SortOrder::Key),
        ChartSpec::new(
            "top-artists-2023",
            "Most streamed artists of 2023",
            ChartKind::Bar,
            KeySpec::Field(Field::ArtistNames),
            streams,
        )
        .with_filter(RowFilter::Equals {
            field: Field::ReleasedYear,
            value: "2023".to_string(),
        })
        .sorted_by(SortOrder::Measure)
        .with_limit(TOP_ARTISTS),
        ChartSpec::new(
            "artist-count",
            "Tracks by number of artists",
            ChartKind::Bar,
            KeySpec::Field(Field::ArtistCount),
            Measure::Count,
        )
        .with_key_cap(ARTIST_COUNT_CUTOFF, ARTIST_COUNT_CAP_LABEL)
        .sorted_by(SortOrder::Key),
        ChartSpec::new(
            "bpm-streams",
            "Streams by tempo",
            ChartKind::Bar,
            KeySpec::Binned {
                field: Field::Bpm,
                width: BPM_BIN_WIDTH,
            },
            streams,
        )
        .sorted_by(SortOrder::Key),
    ]
}

/// Load chart specs from a TOML catalog file
///
/// # Errors
/// * `CatalogError::IoError` - file cannot be read
/// * `CatalogError::ParseFailed` - TOML is invalid
/// * `CatalogError::InvalidSpec` - a chart fails validation
pub fn load_chart_specs(path: impl AsRef<Path>) -> Result<Vec<ChartSpec>, CatalogError> {
    let path = path.as_ref();
    debug!("Reading chart catalog: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let specs = parse_chart_specs(&contents)?;

    info!("Loaded {} chart specs from {}", specs.len(), path.display());
    Ok(specs)
}

/// Parse and validate catalog TOML
pub fn parse_chart_specs(contents: &str) -> Result<Vec<ChartSpec>, CatalogError> {
    let catalog: CatalogFile = toml::from_str(contents)?;

    for spec in &catalog.chart {
        spec.validate()?;
    }

    Ok(catalog.chart)
}

/// Look up a chart by name
pub fn find_chart<'a>(specs: &'a [ChartSpec], name: &str) -> Result<&'a ChartSpec, CatalogError> {
    specs
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| CatalogError::UnknownChart(name.to_string()))
}
