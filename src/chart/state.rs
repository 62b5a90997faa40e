//! Per-chart state.
//!
//! A `ChartState` owns the entry sequence derived for one chart. The
//! sequence is built once from the loaded rows and afterwards only re-sorted
//! by user actions; it is never shared between charts.

use super::spec::ChartSpec;
use crate::aggregator::{
    aggregate, cap_keys, filter_rows, range_label, rebucket, sort_entries, summarize, to_shares,
    total_measure, AggregateEntry, ShareEntry, SortOrder,
};
use crate::dataset::Track;
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct ChartState {
    spec: ChartSpec,
    entries: Vec<AggregateEntry>,
    order: Option<SortOrder>,
}

impl ChartState {
    /// Run the pipeline for `spec` over `rows`
    ///
    /// Filter, group and reduce, cap keys, rebucket, apply the initial sort,
    /// then truncate to the chart's limit.
    pub fn build(spec: ChartSpec, rows: &[Track]) -> Self {
        info!("Building chart '{}' from {} rows", spec.name, rows.len());

        let filtered = filter_rows(rows, &spec.filters);
        let key = spec.key;
        let mut entries = aggregate(filtered.iter().copied(), |t| key.key_of(t), spec.measure);

        if let Some(cap) = &spec.key_cap {
            entries = cap_keys(entries, cap.cutoff, &cap.label);
        }

        if let Some(rb) = &spec.rebucket {
            entries = rebucket(entries, rb.threshold, range_label);
        }

        if let Some(order) = spec.initial_sort {
            sort_entries(&mut entries, order);
        }

        if let Some(limit) = spec.limit {
            if entries.len() > limit {
                debug!("Keeping top {} of {} entries", limit, entries.len());
                entries.truncate(limit);
            }
        }

        info!("Chart '{}': {}", spec.name, summarize(&entries).summary());

        Self {
            order: spec.initial_sort,
            spec,
            entries,
        }
    }

    /// Wrap an already derived sequence (e.g. read back from a report)
    pub fn from_entries(
        spec: ChartSpec,
        entries: Vec<AggregateEntry>,
        order: Option<SortOrder>,
    ) -> Self {
        Self {
            spec,
            entries,
            order,
        }
    }

    /// Re-sort the existing entries and return the new order
    ///
    /// No re-aggregation happens; only positions change.
    pub fn resort(&mut self, order: SortOrder) -> &[AggregateEntry] {
        debug!("Re-sorting chart '{}' by {}", self.spec.name, order);
        sort_entries(&mut self.entries, order);
        self.order = Some(order);
        &self.entries
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn entries(&self) -> &[AggregateEntry] {
        &self.entries
    }

    /// Current order, `None` while still in first-encounter order
    pub fn order(&self) -> Option<SortOrder> {
        self.order
    }

    pub fn total(&self) -> f64 {
        total_measure(&self.entries)
    }

    pub fn shares(&self) -> Vec<ShareEntry> {
        to_shares(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{GroupKey, KeySpec, Measure};
    use crate::chart::spec::ChartKind;
    use crate::dataset::Field;
    use pretty_assertions::assert_eq;

    fn year(value: &str, streams: f64) -> Track {
        Track {
            released_year: value.to_string(),
            streams: Some(streams),
            ..Default::default()
        }
    }

    fn year_spec() -> ChartSpec {
        ChartSpec::new(
            "years",
            "Years",
            ChartKind::Bar,
            KeySpec::Field(Field::ReleasedYear),
            Measure::Sum(Field::Streams),
        )
    }

    fn labels(entries: &[AggregateEntry]) -> Vec<String> {
        entries.iter().map(|e| e.key.label()).collect()
    }

    #[test]
    fn test_build_rebucket_and_sort() {
        let rows = vec![
            year("2022", 50.0),
            year("2019", 2.0),
            year("2023", 80.0),
            year("2021", 3.0),
            year("2020", 1.0),
        ];

        let state = ChartState::build(
            year_spec().with_rebucket(10.0).sorted_by(SortOrder::Key),
            &rows,
        );

        assert_eq!(labels(state.entries()), vec!["2019 - 2021", "2022", "2023"]);
        assert_eq!(state.total(), 136.0);
        assert_eq!(state.order(), Some(SortOrder::Key));
    }

    #[test]
    fn test_resort_changes_only_order() {
        let rows = vec![year("2020", 5.0), year("2021", 9.0), year("2022", 7.0)];
        let mut state = ChartState::build(year_spec(), &rows);
        assert_eq!(state.order(), None);

        let before = state.total();
        let sorted = labels(state.resort(SortOrder::Measure));

        assert_eq!(sorted, vec!["2021", "2022", "2020"]);
        assert_eq!(state.total(), before);
        assert_eq!(state.order(), Some(SortOrder::Measure));
    }

    #[test]
    fn test_build_limit_after_sort() {
        let rows = vec![year("2020", 5.0), year("2021", 9.0), year("2022", 7.0)];
        let state = ChartState::build(year_spec().sorted_by(SortOrder::Measure).with_limit(2), &rows);

        assert_eq!(labels(state.entries()), vec!["2021", "2022"]);
    }

    #[test]
    fn test_build_empty_rows() {
        let state = ChartState::build(year_spec().with_rebucket(10.0), &[]);
        assert!(state.entries().is_empty());
        assert!(state.shares().is_empty());
    }

    #[test]
    fn test_shares_follow_current_order() {
        let rows = vec![year("2020", 1.0), year("2021", 3.0)];
        let mut state = ChartState::build(year_spec(), &rows);
        state.resort(SortOrder::Measure);

        let shares = state.shares();
        assert_eq!(shares[0].key, GroupKey::value("2021"));
        assert_eq!(shares[0].percentage, 75.0);
    }
}
