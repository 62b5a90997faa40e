//! Group, reduce and rebucket dataset rows.
//!
//! Every chart runs the same steps with different parameters:
//! 1. Filter rows
//! 2. Group by a key and reduce with a measure (count or sum)
//! 3. Optionally rebucket: merge small groups, cap large keys
//!
//! Grouping keeps the first-encounter order of keys; ordering for display
//! is a separate step (see [`super::sort`]).

use super::entry::{compare_keys, AggregateEntry, GroupKey};
use crate::dataset::{format_number, Field, Track};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// How each row contributes to its group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Every row counts as 1
    Count,
    /// Sum of a numeric field; missing or invalid values count as 0
    Sum(Field),
}

impl Measure {
    pub fn of(&self, track: &Track) -> f64 {
        match self {
            Measure::Count => 1.0,
            Measure::Sum(field) => track.number(*field).unwrap_or(0.0),
        }
    }

    /// Short name used in reports ("count", "streams")
    pub fn name(&self) -> String {
        match self {
            Measure::Count => "count".to_string(),
            Measure::Sum(field) => field.to_string(),
        }
    }
}

/// Which key a row is grouped under
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySpec {
    /// The field's text as-is
    Field(Field),
    /// Fixed-width bins over a numeric field ("100 - 150")
    Binned { field: Field, width: f64 },
}

impl KeySpec {
    pub fn key_of(&self, track: &Track) -> GroupKey {
        match self {
            KeySpec::Field(field) => GroupKey::Value(track.text(*field).into_owned()),
            KeySpec::Binned { field, width } => match track.number(*field) {
                Some(value) => bin_key(value, *width),
                None => GroupKey::Value(String::new()),
            },
        }
    }

    pub fn field(&self) -> Field {
        match self {
            KeySpec::Field(field) | KeySpec::Binned { field, .. } => *field,
        }
    }
}

/// Row predicate applied before grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowFilter {
    /// Keep rows whose field equals `value` exactly
    Equals { field: Field, value: String },
    /// Drop rows whose field is empty
    NotEmpty { field: Field },
}

impl RowFilter {
    pub fn matches(&self, track: &Track) -> bool {
        match self {
            RowFilter::Equals { field, value } => track.text(*field) == value.as_str(),
            RowFilter::NotEmpty { field } => !track.text(*field).is_empty(),
        }
    }
}

/// Keep the rows that pass every filter
pub fn filter_rows<'a>(rows: &'a [Track], filters: &[RowFilter]) -> Vec<&'a Track> {
    let kept: Vec<&Track> = rows
        .iter()
        .filter(|row| filters.iter().all(|f| f.matches(row)))
        .collect();

    if kept.len() != rows.len() {
        debug!("Filters kept {} of {} rows", kept.len(), rows.len());
    }

    kept
}

/// Group rows by `key_fn` and reduce each group with `measure`
///
/// Returns one entry per distinct key, in first-encounter order.
/// An empty input yields an empty sequence.
pub fn aggregate<'a, I, K>(rows: I, key_fn: K, measure: Measure) -> Vec<AggregateEntry>
where
    I: IntoIterator<Item = &'a Track>,
    K: Fn(&Track) -> GroupKey,
{
    let mut groups: IndexMap<GroupKey, f64> = IndexMap::new();

    for row in rows {
        *groups.entry(key_fn(row)).or_insert(0.0) += measure.of(row);
    }

    debug!("Aggregated into {} groups", groups.len());

    groups
        .into_iter()
        .map(|(key, measure)| AggregateEntry::new(key, measure))
        .collect()
}

/// Merge every entry whose measure is below `threshold` into one entry
///
/// The merged key is `label_fn(lowest, highest)` over the merged keys.
/// Entries at or above the threshold keep their relative order and the
/// merged entry is appended after them. Nothing below the threshold means
/// nothing is merged.
pub fn rebucket<L>(entries: Vec<AggregateEntry>, threshold: f64, label_fn: L) -> Vec<AggregateEntry>
where
    L: Fn(&GroupKey, &GroupKey) -> GroupKey,
{
    let (below, kept): (Vec<AggregateEntry>, Vec<AggregateEntry>) =
        entries.into_iter().partition(|e| e.measure < threshold);

    let (Some(lowest), Some(highest)) = (
        below.iter().map(|e| &e.key).min_by(|a, b| compare_keys(a, b)),
        below.iter().map(|e| &e.key).max_by(|a, b| compare_keys(a, b)),
    ) else {
        return kept;
    };

    let merged = AggregateEntry::new(
        label_fn(lowest, highest),
        below.iter().map(|e| e.measure).sum(),
    );

    debug!(
        "Merged {} entries below {} into '{}'",
        below.len(),
        threshold,
        merged.key
    );

    reaggregate(kept.into_iter().chain(std::iter::once(merged)))
}

/// Default rebucket label: closed range from the lowest to the highest member
pub fn range_label(lowest: &GroupKey, highest: &GroupKey) -> GroupKey {
    GroupKey::range(lowest.lower_bound(), highest.upper_bound())
}

/// Collapse every numeric key above `cutoff` into the single key `label`
///
/// Threshold on the key rather than the measure ("4+" artists).
pub fn cap_keys(entries: Vec<AggregateEntry>, cutoff: f64, label: &str) -> Vec<AggregateEntry> {
    reaggregate(entries.into_iter().map(|entry| {
        let over = entry.key.as_number().is_some_and(|value| value > cutoff);
        if over {
            AggregateEntry::new(GroupKey::value(label), entry.measure)
        } else {
            entry
        }
    }))
}

/// Fixed-width bin containing `value`
///
/// A non-positive width disables binning and keeps the value itself.
pub fn bin_key(value: f64, width: f64) -> GroupKey {
    if !width.is_finite() || width <= 0.0 {
        return GroupKey::Value(format_number(value));
    }

    let start = (value / width).floor() * width;
    GroupKey::range(format_number(start), format_number(start + width))
}

/// Sum entries sharing a key, first-encounter order
fn reaggregate(entries: impl Iterator<Item = AggregateEntry>) -> Vec<AggregateEntry> {
    let mut groups: IndexMap<GroupKey, f64> = IndexMap::new();

    for entry in entries {
        *groups.entry(entry.key).or_insert(0.0) += entry.measure;
    }

    groups
        .into_iter()
        .map(|(key, measure)| AggregateEntry::new(key, measure))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(key: &str, measure: f64) -> AggregateEntry {
        AggregateEntry::new(GroupKey::value(key), measure)
    }

    fn month(value: &str) -> Track {
        Track {
            released_month: value.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_counts_in_encounter_order() {
        let rows = vec![month("1"), month("1"), month("3")];
        let entries = aggregate(&rows, |t| KeySpec::Field(Field::ReleasedMonth).key_of(t), Measure::Count);

        assert_eq!(entries, vec![entry("1", 2.0), entry("3", 1.0)]);
    }

    #[test]
    fn test_aggregate_sum_treats_missing_as_zero() {
        let rows = vec![
            Track { mode: "Major".into(), streams: Some(10.0), ..Default::default() },
            Track { mode: "Major".into(), streams: None, ..Default::default() },
            Track { mode: "Minor".into(), streams: Some(4.0), ..Default::default() },
        ];

        let entries = aggregate(&rows, |t| GroupKey::value(t.mode.clone()), Measure::Sum(Field::Streams));
        assert_eq!(entries, vec![entry("Major", 10.0), entry("Minor", 4.0)]);
    }

    #[test]
    fn test_aggregate_empty() {
        let rows: Vec<Track> = Vec::new();
        assert!(aggregate(&rows, |t| GroupKey::value(t.key.clone()), Measure::Count).is_empty());
    }

    #[test]
    fn test_rebucket_merges_below_threshold() {
        let entries = vec![entry("1", 5.0), entry("2", 10.0), entry("3", 3.0)];
        let merged = rebucket(entries, 6.0, range_label);

        assert_eq!(
            merged,
            vec![
                entry("2", 10.0),
                AggregateEntry::new(GroupKey::range("1", "3"), 8.0),
            ]
        );
    }

    #[test]
    fn test_rebucket_numeric_bounds() {
        // "10" must not be lower than "9"
        let entries = vec![entry("9", 1.0), entry("10", 2.0), entry("11", 50.0)];
        let merged = rebucket(entries, 20.0, range_label);

        assert_eq!(merged[1].key, GroupKey::range("9", "10"));
    }

    #[test]
    fn test_rebucket_nothing_below() {
        let entries = vec![entry("1", 50.0), entry("2", 60.0)];
        let merged = rebucket(entries.clone(), 6.0, range_label);
        assert_eq!(merged, entries);
    }

    #[test]
    fn test_cap_keys() {
        let entries = vec![entry("2", 100.0), entry("1", 500.0), entry("5", 3.0), entry("3", 20.0), entry("4", 7.0)];
        let capped = cap_keys(entries, 3.0, "4+");

        assert_eq!(
            capped,
            vec![entry("2", 100.0), entry("1", 500.0), entry("4+", 10.0), entry("3", 20.0)]
        );
    }

    #[test]
    fn test_bin_key() {
        assert_eq!(bin_key(125.0, 50.0), GroupKey::range("100", "150"));
        assert_eq!(bin_key(50.0, 50.0), GroupKey::range("50", "100"));
        assert_eq!(bin_key(49.9, 50.0), GroupKey::range("0", "50"));
        assert_eq!(bin_key(125.0, 0.0), GroupKey::value("125"));
    }

    #[test]
    fn test_binned_key_missing_value() {
        let spec = KeySpec::Binned { field: Field::Bpm, width: 50.0 };
        assert_eq!(spec.key_of(&Track::default()), GroupKey::value(""));
    }

    #[test]
    fn test_filters() {
        let rows = vec![
            Track { mode: "Major".into(), key: "C#".into(), ..Default::default() },
            Track { mode: "Minor".into(), key: "".into(), ..Default::default() },
            Track { mode: "Major".into(), key: "".into(), ..Default::default() },
        ];

        let major = filter_rows(&rows, &[RowFilter::Equals { field: Field::Mode, value: "Major".into() }]);
        assert_eq!(major.len(), 2);

        let keyed = filter_rows(&rows, &[RowFilter::NotEmpty { field: Field::Key }]);
        assert_eq!(keyed.len(), 1);
        assert_eq!(keyed[0].key, "C#");
    }
}
