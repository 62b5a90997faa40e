//! Chart configuration and per-chart state.
//!
//! A chart is one parameterisation of the aggregation pipeline (key,
//! measure, filters, rebucketing, initial order) plus the entry sequence it
//! produced.

pub mod catalog;
pub mod spec;
pub mod state;

// Re-export main types
pub use catalog::{builtin_charts, find_chart, load_chart_specs, parse_chart_specs};
pub use spec::{ChartKind, ChartSpec, KeyCapSpec, RebucketSpec};
pub use state::ChartState;
