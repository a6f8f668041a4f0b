//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod demo;
pub mod utils;

// Re-export main command functions
pub use demo::{execute_demo, validate_args, DemoArgs, SampleWorkload};
pub use utils::{display_schema, display_version, validate_report_file};
