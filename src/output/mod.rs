//! Output writers for profile data.
//!
//! This module handles rendering and writing data in various formats:
//! - JSON reports (versioned schema)
//! - Collapsed stacks for flamegraph tools
//! - Text tables (flat and tree)

pub mod collapsed;
pub mod json;
pub mod schema;
pub mod text;

// Re-export main functions
pub use collapsed::write_collapsed;
pub use json::{read_report, report_to_string, write_report};
pub use schema::ProfileReport;
pub use text::{render_flat, render_tree, write_flat, write_tree};
