//! Spotify Charts CLI
//!
//! Builds chart data from the Spotify 2023 dataset and re-sorts saved
//! charts on demand.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use spotify_charts::aggregator::SortOrder;
use spotify_charts::commands::{
    display_version, execute_render, execute_resort, list_charts, validate_args,
    validate_report_file, RenderArgs, ResortArgs,
};
use spotify_charts::utils::config::DEFAULT_DATASET;

/// Spotify Charts - aggregation pipeline for streaming charts
#[derive(Parser, Debug)]
#[command(name = "spotify-charts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Sort actions exposed on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    /// Category ascending
    Key,
    /// Measure descending
    Measure,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Key => SortOrder::Key,
            SortArg::Measure => SortOrder::Measure,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build charts from the dataset
    Render {
        /// Dataset CSV path or http(s) URL
        #[arg(short, long, env = "SPOTIFY_CHARTS_DATASET", default_value = DEFAULT_DATASET)]
        dataset: String,

        /// Chart to build (repeatable); all charts when omitted
        #[arg(short, long = "chart")]
        charts: Vec<String>,

        /// TOML chart catalog replacing the built-in charts
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Directory for JSON chart reports (stdout when omitted without --summary)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-sort every chart after building
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Rows per chart in the text summary
        #[arg(long, default_value = "20")]
        max_lines: usize,
    },

    /// Re-sort a saved chart report
    Resort {
        /// Report written by `render`
        #[arg(short, long)]
        report: PathBuf,

        /// New order
        #[arg(short, long, value_enum)]
        by: SortArg,

        /// Output path (defaults to overwriting the report)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a chart report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List available charts
    Charts {
        /// TOML chart catalog to list instead of the built-in charts
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            dataset,
            charts,
            catalog,
            output,
            sort,
            summary,
            max_lines,
        } => {
            let args = RenderArgs {
                dataset,
                charts,
                catalog,
                output_dir: output,
                sort: sort.map(SortOrder::from),
                print_summary: summary,
                max_lines,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::Resort {
            report,
            by,
            output,
            summary,
        } => {
            execute_resort(ResortArgs {
                report,
                order: by.into(),
                output,
                print_summary: summary,
            })?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Charts { catalog } => {
            list_charts(catalog)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
