//! Per-chart pipeline configuration.

use crate::aggregator::{KeySpec, Measure, RowFilter, SortOrder};
use crate::utils::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual form the rendering surface draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
        };
        f.write_str(name)
    }
}

/// Merge categories whose measure falls below `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebucketSpec {
    pub threshold: f64,
}

/// Collapse numeric keys above `cutoff` into `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCapSpec {
    pub cutoff: f64,
    pub label: String,
}

/// Everything needed to turn rows into one chart's entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Identifier used on the command line
    pub name: String,

    /// Human-readable title
    pub title: String,

    pub kind: ChartKind,

    pub key: KeySpec,

    pub measure: Measure,

    /// Row filters applied before grouping
    #[serde(default)]
    pub filters: Vec<RowFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_cap: Option<KeyCapSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebucket: Option<RebucketSpec>,

    /// Order after building; `None` keeps first-encounter order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_sort: Option<SortOrder>,

    /// Keep only the first N entries after the initial sort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ChartSpec {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        kind: ChartKind,
        key: KeySpec,
        measure: Measure,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind,
            key,
            measure,
            filters: Vec::new(),
            key_cap: None,
            rebucket: None,
            initial_sort: None,
            limit: None,
        }
    }

    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_rebucket(mut self, threshold: f64) -> Self {
        self.rebucket = Some(RebucketSpec { threshold });
        self
    }

    pub fn with_key_cap(mut self, cutoff: f64, label: impl Into<String>) -> Self {
        self.key_cap = Some(KeyCapSpec {
            cutoff,
            label: label.into(),
        });
        self
    }

    pub fn sorted_by(mut self, order: SortOrder) -> Self {
        self.initial_sort = Some(order);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject specs the pipeline cannot run meaningfully
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidSpec {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }

        if let KeySpec::Binned { width, .. } = self.key {
            if !width.is_finite() || width <= 0.0 {
                return Err(invalid("bin width must be a positive number"));
            }
        }

        if let Some(rebucket) = &self.rebucket {
            if !rebucket.threshold.is_finite() {
                return Err(invalid("rebucket threshold must be finite"));
            }
        }

        if let Some(cap) = &self.key_cap {
            if !cap.cutoff.is_finite() || cap.label.is_empty() {
                return Err(invalid("key cap needs a finite cutoff and a label"));
            }
        }

        if self.limit == Some(0) {
            return Err(invalid("limit must be greater than 0"));
        }

        Ok(())
    }
}
