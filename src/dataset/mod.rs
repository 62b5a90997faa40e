//! Dataset loading and the typed row schema.
//!
//! This module handles:
//! - Resolving a dataset source (local path or http(s) URL)
//! - Parsing CSV into typed [`Track`] rows
//! - Tolerant numeric coercion of measure columns

pub mod fetch;
pub mod loader;
pub mod schema;

// Re-export main types
pub use fetch::DatasetClient;
pub use loader::{load_dataset, parse_dataset, DatasetSource};
pub use schema::{coerce_number, format_number, Field, Track};
