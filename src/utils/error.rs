//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    BadStatus { status: u16, url: String },

    #[error("Dataset has no header row")]
    MissingHeader,

    #[error("Invalid dataset source: {0}")]
    InvalidSource(String),
}

/// Errors that can occur while resolving chart definitions
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown chart: {0}")]
    UnknownChart(String),

    #[error("Chart catalog TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid chart spec '{name}': {reason}")]
    InvalidSpec { name: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
