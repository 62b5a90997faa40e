//! Summary statistics and shares over aggregate sequences.
//!
//! Shares feed pie charts; the distribution summary is logged after every
//! chart build and printed in the terminal summary.

use super::entry::{AggregateEntry, GroupKey};
use log::debug;
use serde::{Deserialize, Serialize};

/// An entry together with its share of the sequence total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub key: GroupKey,
    pub measure: f64,
    /// Percentage of the total measure (0 when the total is 0)
    pub percentage: f64,
}

/// Sum of all measures
pub fn total_measure(entries: &[AggregateEntry]) -> f64 {
    entries.iter().map(|e| e.measure).sum()
}

/// Percentage share of every entry, same order as the input
pub fn to_shares(entries: &[AggregateEntry]) -> Vec<ShareEntry> {
    let total = total_measure(entries);
    debug!("Computing shares of {} entries (total {})", entries.len(), total);

    entries
        .iter()
        .map(|entry| ShareEntry {
            key: entry.key.clone(),
            measure: entry.measure,
            percentage: percentage_of(entry.measure, total),
        })
        .collect()
}

/// Distribution statistics for one chart
#[derive(Debug, Clone, Default)]
pub struct MeasureDistribution {
    /// Total measure across all entries
    pub total: f64,

    /// Number of categories
    pub entry_count: usize,

    /// Mean measure per category
    pub mean: f64,

    /// Category with the largest measure
    pub largest: Option<AggregateEntry>,

    /// Share of the largest category
    pub largest_percentage: f64,
}

/// Calculate distribution statistics
pub fn summarize(entries: &[AggregateEntry]) -> MeasureDistribution {
    if entries.is_empty() {
        return MeasureDistribution::default();
    }

    let total = total_measure(entries);
    let largest = entries
        .iter()
        .max_by(|a, b| a.measure.total_cmp(&b.measure))
        .cloned();
    let largest_percentage = largest
        .as_ref()
        .map(|e| percentage_of(e.measure, total))
        .unwrap_or(0.0);

    MeasureDistribution {
        total,
        entry_count: entries.len(),
        mean: total / entries.len() as f64,
        largest,
        largest_percentage,
    }
}

impl MeasureDistribution {
    /// Get human-readable summary
    pub fn summary(&self) -> String {
        let largest = self
            .largest
            .as_ref()
            .map(|e| e.key.label())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "Total: {} | Categories: {} | Mean: {:.1} | Largest: {} ({:.1}%)",
            self.total, self.entry_count, self.mean, largest, self.largest_percentage
        )
    }
}

fn percentage_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        (value / total) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, measure: f64) -> AggregateEntry {
        AggregateEntry::new(GroupKey::value(key), measure)
    }

    #[test]
    fn test_to_shares() {
        let shares = to_shares(&[entry("Major", 3.0), entry("Minor", 1.0)]);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn test_to_shares_zero_total() {
        let shares = to_shares(&[entry("a", 0.0)]);
        assert_eq!(shares[0].percentage, 0.0);
    }

    #[test]
    fn test_summarize() {
        let dist = summarize(&[entry("1", 8.0), entry("2", 1.0), entry("3", 1.0)]);

        assert_eq!(dist.total, 10.0);
        assert_eq!(dist.entry_count, 3);
        assert_eq!(dist.largest.map(|e| e.key), Some(GroupKey::value("1")));
        assert_eq!(dist.largest_percentage, 80.0);
    }

    #[test]
    fn test_summarize_empty() {
        let dist = summarize(&[]);
        assert_eq!(dist.entry_count, 0);
        assert!(dist.largest.is_none());
    }
}
