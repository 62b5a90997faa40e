use crate::aggregator::SortOrder;
use crate::utils::config::DEFAULT_DATASET;
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Dataset location (CSV path or http(s) URL)
    pub dataset: String,

    /// Charts to build; empty means every chart in the catalog
    pub charts: Vec<String>,

    /// Optional TOML catalog replacing the built-in charts
    pub catalog: Option<PathBuf>,

    /// Directory for JSON chart reports (optional)
    pub output_dir: Option<PathBuf>,

    /// Re-sort every chart after building
    pub sort: Option<SortOrder>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Rows shown per chart in the text summary
    pub max_lines: usize,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            charts: Vec::new(),
            catalog: None,
            output_dir: None,
            sort: None,
            print_summary: false,
            max_lines: 20,
        }
    }
}

/// Arguments for the resort command
#[derive(Debug, Clone)]
pub struct ResortArgs {
    /// Report written by `render`
    pub report: PathBuf,

    /// New order
    pub order: SortOrder,

    /// Where to write the re-sorted report; defaults to `report`
    pub output: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}
