//! Typed row schema for the streaming dataset.
//!
//! Rows are coerced once at load time. Categorical columns keep their raw
//! (trimmed) text, numeric measure columns are parsed into `Option<f64>` so
//! that a malformed cell never aborts aggregation.

use crate::utils::config::{
    COLUMN_ARTIST_COUNT, COLUMN_ARTIST_NAMES, COLUMN_BPM, COLUMN_KEY, COLUMN_MODE,
    COLUMN_RELEASED_DAY, COLUMN_RELEASED_MONTH, COLUMN_RELEASED_YEAR, COLUMN_STREAMS,
    COLUMN_TRACK_NAME,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// One track of the dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub track_name: String,
    pub artist_names: String,
    pub artist_count: String,
    pub released_year: String,
    pub released_month: String,
    pub released_day: String,

    /// Total streams; `None` when the cell is missing or not a number
    pub streams: Option<f64>,

    /// Beats per minute; `None` when the cell is missing or not a number
    pub bpm: Option<f64>,

    /// Musical key ("C#", "G", ...), empty when unknown
    pub key: String,

    /// "Major" or "Minor"
    pub mode: String,
}

/// Columns a chart can group by, filter on, or measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TrackName,
    #[serde(alias = "artist(s)_name")]
    ArtistNames,
    ArtistCount,
    ReleasedYear,
    ReleasedMonth,
    ReleasedDay,
    Streams,
    Bpm,
    Key,
    Mode,
}

impl Field {
    /// Every field, in dataset column order
    pub const ALL: [Field; 10] = [
        Field::TrackName,
        Field::ArtistNames,
        Field::ArtistCount,
        Field::ReleasedYear,
        Field::ReleasedMonth,
        Field::ReleasedDay,
        Field::Streams,
        Field::Bpm,
        Field::Key,
        Field::Mode,
    ];

    /// CSV header this field is read from
    pub fn column(self) -> &'static str {
        match self {
            Field::TrackName => COLUMN_TRACK_NAME,
            Field::ArtistNames => COLUMN_ARTIST_NAMES,
            Field::ArtistCount => COLUMN_ARTIST_COUNT,
            Field::ReleasedYear => COLUMN_RELEASED_YEAR,
            Field::ReleasedMonth => COLUMN_RELEASED_MONTH,
            Field::ReleasedDay => COLUMN_RELEASED_DAY,
            Field::Streams => COLUMN_STREAMS,
            Field::Bpm => COLUMN_BPM,
            Field::Key => COLUMN_KEY,
            Field::Mode => COLUMN_MODE,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl Track {
    /// Categorical view of a field
    ///
    /// Numeric columns are rendered back to text (integral values without a
    /// fractional part); missing numbers become the empty string.
    pub fn text(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::TrackName => Cow::Borrowed(&self.track_name),
            Field::ArtistNames => Cow::Borrowed(&self.artist_names),
            Field::ArtistCount => Cow::Borrowed(&self.artist_count),
            Field::ReleasedYear => Cow::Borrowed(&self.released_year),
            Field::ReleasedMonth => Cow::Borrowed(&self.released_month),
            Field::ReleasedDay => Cow::Borrowed(&self.released_day),
            Field::Key => Cow::Borrowed(&self.key),
            Field::Mode => Cow::Borrowed(&self.mode),
            Field::Streams => Cow::Owned(self.streams.map(format_number).unwrap_or_default()),
            Field::Bpm => Cow::Owned(self.bpm.map(format_number).unwrap_or_default()),
        }
    }

    /// Numeric view of a field, `None` when the value is absent or not a number
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Streams => self.streams,
            Field::Bpm => self.bpm,
            other => coerce_number(&self.text(other)),
        }
    }

    /// Set a field from its raw CSV text
    pub fn set(&mut self, field: Field, raw: &str) {
        let value = raw.trim();
        match field {
            Field::TrackName => self.track_name = value.to_string(),
            Field::ArtistNames => self.artist_names = value.to_string(),
            Field::ArtistCount => self.artist_count = value.to_string(),
            Field::ReleasedYear => self.released_year = value.to_string(),
            Field::ReleasedMonth => self.released_month = value.to_string(),
            Field::ReleasedDay => self.released_day = value.to_string(),
            Field::Key => self.key = value.to_string(),
            Field::Mode => self.mode = value.to_string(),
            Field::Streams => self.streams = coerce_number(value),
            Field::Bpm => self.bpm = coerce_number(value),
        }
    }
}

/// Tolerant numeric coercion
///
/// Accepts plain decimals and integers with thousands separators
/// ("1,234,567"). Anything else, including non-finite values, is `None`.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned: Cow<'_, str> = if trimmed.contains(',') {
        Cow::Owned(trimmed.replace(',', ""))
    } else {
        Cow::Borrowed(trimmed)
    };

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a number the way the dataset writes it
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("141381703"), Some(141_381_703.0));
        assert_eq!(coerce_number(" 1,234 "), Some(1234.0));
        assert_eq!(coerce_number("92.5"), Some(92.5));
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("BPM110KeyAModeMajor"), None);
        assert_eq!(coerce_number("NaN"), None);
    }

    #[test]
    fn test_text_and_number_views() {
        let mut track = Track::default();
        track.set(Field::ReleasedMonth, " 7 ");
        track.set(Field::Streams, "2,000");
        track.set(Field::Bpm, "not a number");

        assert_eq!(track.text(Field::ReleasedMonth), "7");
        assert_eq!(track.number(Field::ReleasedMonth), Some(7.0));
        assert_eq!(track.text(Field::Streams), "2000");
        assert_eq!(track.number(Field::Bpm), None);
        assert_eq!(track.text(Field::Bpm), "");
    }

    #[test]
    fn test_field_serde_names() {
        let field: Field = serde_json::from_str("\"released_year\"").unwrap();
        assert_eq!(field, Field::ReleasedYear);

        let alias: Field = serde_json::from_str("\"artist(s)_name\"").unwrap();
        assert_eq!(alias, Field::ArtistNames);
        assert_eq!(Field::ArtistNames.to_string(), "artist(s)_name");
    }
}
