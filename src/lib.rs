//! Spotify Charts
//!
//! Aggregation and binning pipeline for exploratory charts over the
//! Spotify 2023 streaming dataset.
//!
//! Rows are loaded once, grouped by a key, reduced with a measure (count or
//! sum), optionally rebucketed, and emitted as an ordered sequence of
//! `{key, measure}` entries for a rendering surface to draw. Each chart
//! keeps its own [`chart::ChartState`] and can be re-sorted by key or by
//! measure without re-aggregating.
//!
//! ## Getting Started
//!
//! ```bash
//! spotify-charts render --dataset spotify-2023.csv --chart year-counts
//! spotify-charts --help
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod dataset;
pub mod output;
pub mod utils;
