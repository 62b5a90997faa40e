//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod render;
pub mod resort;
pub mod utils;

// Re-export main command functions
pub use models::{RenderArgs, ResortArgs};
pub use render::{execute_render, validate_args};
pub use resort::execute_resort;
pub use utils::{display_version, list_charts, validate_report_file};
