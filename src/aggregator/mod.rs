//! Aggregation of dataset rows into ordered chart entries.
//!
//! This module transforms loaded rows into:
//! - Grouped and reduced entries (count or sum per category)
//! - Rebucketed entries (small groups merged, large keys capped, numeric bins)
//! - Sorted sequences ready for a rendering surface

pub mod entry;
pub mod metrics;
pub mod pipeline;
pub mod sort;

// Re-export main types and functions
pub use entry::{compare_keys, AggregateEntry, GroupKey};
pub use metrics::{summarize, to_shares, total_measure, MeasureDistribution, ShareEntry};
pub use pipeline::{
    aggregate, bin_key, cap_keys, filter_rows, range_label, rebucket, KeySpec, Measure, RowFilter,
};
pub use sort::{sort_by_key, sort_by_measure, sort_entries, SortOrder};
