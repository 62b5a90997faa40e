//! Group keys and aggregate entries.
//!
//! An [`AggregateEntry`] is the unit a rendering surface consumes: one
//! category and its measure. Categories are either a plain value taken from
//! the dataset or a closed range produced by rebucketing or binning.

use crate::utils::config::RANGE_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Category rows are grouped under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    /// A value as it appears in the dataset ("2022", "C#", "4+")
    Value(String),

    /// Inclusive range of merged or binned values, displayed "start - end"
    Range { start: String, end: String },
}

impl GroupKey {
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    pub fn range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Range {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }

    /// Lowest value covered by this key
    pub fn lower_bound(&self) -> &str {
        match self {
            Self::Value(value) => value,
            Self::Range { start, .. } => start,
        }
    }

    /// Highest value covered by this key
    pub fn upper_bound(&self) -> &str {
        match self {
            Self::Value(value) => value,
            Self::Range { end, .. } => end,
        }
    }

    /// Numeric reading of a plain key, `None` for ranges and non-numbers
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Value(value) => parse_label(value),
            Self::Range { .. } => None,
        }
    }

    /// Display label
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::Range { start, end } => write!(f, "{}{}{}", start, RANGE_SEPARATOR, end),
        }
    }
}

/// One category and its aggregated measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub key: GroupKey,
    pub measure: f64,
}

impl AggregateEntry {
    pub fn new(key: GroupKey, measure: f64) -> Self {
        Self { key, measure }
    }
}

/// Ascending key order
///
/// Each key is placed by its lower bound, so a merged range lands where its
/// lowest member would have been. Numeric bounds compare numerically and
/// sort ahead of non-numeric ones, which compare lexically. On equal bounds
/// a range sorts before a plain value, then ranges by their upper bound.
/// Keys that spell the same number differently ("7", "07") fall back to
/// their raw text, so only identical keys compare equal.
pub fn compare_keys(a: &GroupKey, b: &GroupKey) -> Ordering {
    compare_labels(a.lower_bound(), b.lower_bound())
        .then_with(|| b.is_range().cmp(&a.is_range()))
        .then_with(|| compare_labels(a.upper_bound(), b.upper_bound()))
        .then_with(|| a.lower_bound().cmp(b.lower_bound()))
        .then_with(|| a.upper_bound().cmp(b.upper_bound()))
}

/// Compare two raw labels: numbers first (numerically), then text
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (parse_label(a), parse_label(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_label(label: &str) -> Option<f64> {
    label.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
