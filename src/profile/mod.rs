//! Call-stack tracking and per-class aggregation.
//!
//! This module holds the profiling core:
//! - Call-time records and the recursive merge
//! - Per-thread call stacks
//! - Per-class stores and the registry that owns them

pub mod guard;
pub mod record;
pub mod registry;
pub mod store;
pub mod tracker;

// Re-export main types
pub use guard::CallGuard;
pub use record::{merge_into, merge_tree, CallKey, CallTree, ProfileRecord};
pub use registry::ProfileRegistry;
pub use store::{ClassProfileStore, ProfileData};
pub use tracker::{CallFrame, CallStackTracker};
