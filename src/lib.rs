//! Proxy Profiler
//!
//! Instruments method calls on wrapped objects, recording elapsed time per
//! method and the nested call structure. Data is shared by every wrapped
//! instance of the same class and can be reported as a flat per-method
//! summary or as a call tree with per-node percentages.
//!
//! ## Getting Started
//!
//! ```
//! use proxy_profiler::{Profiled, ProfileRegistry};
//! use proxy_profiler::output::{render_flat, render_tree};
//!
//! struct Spam;
//!
//! let registry = ProfileRegistry::new();
//! let spam = Profiled::new(Spam, &registry);
//! spam.call("eggs", |s| s.call("beans", |_| ()));
//!
//! let store = spam.profile_data();
//! print!("{}", render_flat(store.flat_stats()));
//! print!("{}", render_tree(store.tree_stats()));
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod profile;
pub mod proxy;
pub mod stats;
pub mod utils;

pub use profile::{CallGuard, CallKey, ClassProfileStore, ProfileRecord, ProfileRegistry};
pub use proxy::{instrument, Profiled};
pub use stats::{FlatStat, TreeStat};
pub use utils::error::{OutputError, ProfileError};
