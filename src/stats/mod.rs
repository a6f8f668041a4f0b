//! Statistical views derived from a class's profile data.
//!
//! Both views are lazy iterators over a snapshot:
//! - Flat: per-method call count, total and average time
//! - Tree: per-call-path time with percentages of the caller's time

pub mod flat;
pub mod tree;

// Re-export main types
pub use flat::{FlatStat, FlatStats};
pub use tree::{TreeStat, TreeStats};
