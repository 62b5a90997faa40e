//! Chart report JSON schema.
//!
//! This is the payload handed to the rendering surface: the chart's
//! configuration and its entries in display order. Schema is versioned to
//! allow future evolution.

use crate::aggregator::{AggregateEntry, GroupKey, SortOrder};
use crate::chart::{ChartKind, ChartSpec, ChartState};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Dataset the chart was built from (path or URL)
    pub dataset: String,

    /// Pipeline configuration that produced the entries
    pub chart: ChartSpec,

    /// Current order, absent while in first-encounter order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,

    /// Sum of all measures
    pub total: f64,

    /// Entries in display order
    pub entries: Vec<ReportEntry>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One bar, slice or point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Axis / legend label ("2019 - 2021")
    pub label: String,

    pub key: GroupKey,

    pub measure: f64,

    /// Share of the total, pie charts only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl ChartReport {
    /// Snapshot a chart's current state
    pub fn from_state(state: &ChartState, dataset: impl Into<String>) -> Self {
        let entries = if state.spec().kind == ChartKind::Pie {
            state
                .shares()
                .into_iter()
                .map(|share| ReportEntry {
                    label: share.key.label(),
                    key: share.key,
                    measure: share.measure,
                    percentage: Some(share.percentage),
                })
                .collect()
        } else {
            state
                .entries()
                .iter()
                .map(|entry| ReportEntry {
                    label: entry.key.label(),
                    key: entry.key.clone(),
                    measure: entry.measure,
                    percentage: None,
                })
                .collect()
        };

        Self {
            version: SCHEMA_VERSION.to_string(),
            dataset: dataset.into(),
            chart: state.spec().clone(),
            sort: state.order(),
            total: state.total(),
            entries,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Rebuild chart state from the saved entries without touching the dataset
    pub fn to_state(&self) -> ChartState {
        let entries = self
            .entries
            .iter()
            .map(|e| AggregateEntry::new(e.key.clone(), e.measure))
            .collect();

        ChartState::from_entries(self.chart.clone(), entries, self.sort)
    }
}
