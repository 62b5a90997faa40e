//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for remote dataset fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Current chart report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Dataset loaded when no source is given
pub const DEFAULT_DATASET: &str = "spotify-2023.csv";

// Rebucketing defaults used by the built-in charts.
// Callers may override all of these through a chart catalog file.
pub const MONTH_COUNT_THRESHOLD: f64 = 20.0;
pub const YEAR_COUNT_THRESHOLD: f64 = 36.0;
pub const STREAMS_THRESHOLD: f64 = 7_000_000_000.0;
pub const BPM_BIN_WIDTH: f64 = 50.0;
pub const ARTIST_COUNT_CUTOFF: f64 = 3.0;
pub const ARTIST_COUNT_CAP_LABEL: &str = "4+";
pub const TOP_ARTISTS: usize = 10;

/// Separator between the bounds of a merged range key ("2019 - 2021")
pub const RANGE_SEPARATOR: &str = " - ";

// Column names in the source CSV
pub const COLUMN_TRACK_NAME: &str = "track_name";
pub const COLUMN_ARTIST_NAMES: &str = "artist(s)_name";
pub const COLUMN_ARTIST_COUNT: &str = "artist_count";
pub const COLUMN_RELEASED_YEAR: &str = "released_year";
pub const COLUMN_RELEASED_MONTH: &str = "released_month";
pub const COLUMN_RELEASED_DAY: &str = "released_day";
pub const COLUMN_STREAMS: &str = "streams";
pub const COLUMN_BPM: &str = "bpm";
pub const COLUMN_KEY: &str = "key";
pub const COLUMN_MODE: &str = "mode";
