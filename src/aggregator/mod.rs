//! Aggregation of the call tree into collapsed stacks and metrics.
//!
//! This module transforms a class's call tree into:
//! - Collapsed stack format (for external flamegraph tools)
//! - Hot path analysis (paths with the most self time)

pub mod stack_builder;
pub mod metrics;

// Re-export main types and functions
pub use stack_builder::{CollapsedStack, build_collapsed_stacks};
pub use metrics::{calculate_hot_paths, create_hot_path, total_weight, HotPath};
