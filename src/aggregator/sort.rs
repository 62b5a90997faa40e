//! Display ordering of aggregate sequences.
//!
//! Both orders are stable and total over a sequence with unique keys, so the
//! result of a sort depends only on the entries, never on the order they
//! were in before.

use super::entry::{compare_keys, AggregateEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-selectable sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Category ascending (ranges placed by their start)
    Key,
    /// Measure descending, ties broken by key
    Measure,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Key => "key",
            SortOrder::Measure => "measure",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key" => Ok(SortOrder::Key),
            "measure" => Ok(SortOrder::Measure),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Sort entries in place
pub fn sort_entries(entries: &mut [AggregateEntry], order: SortOrder) {
    match order {
        SortOrder::Key => sort_by_key(entries),
        SortOrder::Measure => sort_by_measure(entries),
    }
}

pub fn sort_by_key(entries: &mut [AggregateEntry]) {
    entries.sort_by(|a, b| compare_keys(&a.key, &b.key));
}

pub fn sort_by_measure(entries: &mut [AggregateEntry]) {
    entries.sort_by(|a, b| {
        b.measure
            .total_cmp(&a.measure)
            .then_with(|| compare_keys(&a.key, &b.key))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::entry::GroupKey;
    use pretty_assertions::assert_eq;

    fn labels(entries: &[AggregateEntry]) -> Vec<String> {
        entries.iter().map(|e| e.key.label()).collect()
    }

    #[test]
    fn test_sort_by_key_with_merged_range() {
        let mut entries = vec![
            AggregateEntry::new(GroupKey::value("2020"), 5.0),
            AggregateEntry::new(GroupKey::range("2019", "2021"), 12.0),
            AggregateEntry::new(GroupKey::value("2022"), 1.0),
        ];

        sort_by_key(&mut entries);
        assert_eq!(labels(&entries), vec!["2019 - 2021", "2020", "2022"]);
    }

    #[test]
    fn test_sort_by_key_months_numeric() {
        let mut entries: Vec<AggregateEntry> = ["11", "2", "10", "1"]
            .iter()
            .map(|m| AggregateEntry::new(GroupKey::value(*m), 1.0))
            .collect();

        sort_by_key(&mut entries);
        assert_eq!(labels(&entries), vec!["1", "2", "10", "11"]);
    }

    #[test]
    fn test_sort_by_measure_descending() {
        let mut entries = vec![
            AggregateEntry::new(GroupKey::value("a"), 1.0),
            AggregateEntry::new(GroupKey::value("b"), 9.0),
            AggregateEntry::new(GroupKey::value("c"), 4.0),
        ];

        sort_by_measure(&mut entries);
        assert_eq!(labels(&entries), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_equal_measures_ignore_history() {
        let mut first = vec![
            AggregateEntry::new(GroupKey::value("B"), 5.0),
            AggregateEntry::new(GroupKey::value("A"), 5.0),
        ];
        let mut second: Vec<AggregateEntry> = first.iter().rev().cloned().collect();

        sort_by_measure(&mut first);
        sort_by_measure(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_by_key_ignores_history_for_padded_numbers() {
        let mut first = vec![
            AggregateEntry::new(GroupKey::value("7"), 2.0),
            AggregateEntry::new(GroupKey::value("07"), 2.0),
        ];
        let mut second: Vec<AggregateEntry> = first.iter().rev().cloned().collect();

        sort_by_measure(&mut first);
        sort_by_key(&mut first);
        sort_by_measure(&mut second);
        sort_by_key(&mut second);

        assert_eq!(first, second);
        assert_eq!(labels(&first), vec!["07", "7"]);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("Key".parse::<SortOrder>(), Ok(SortOrder::Key));
        assert_eq!("measure".parse::<SortOrder>(), Ok(SortOrder::Measure));
        assert!("month".parse::<SortOrder>().is_err());
    }
}
