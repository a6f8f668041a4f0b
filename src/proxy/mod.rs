//! Interception layer: wraps objects and callables with profiling.
//!
//! Two ways to drive the push/pop contract:
//! - [`Profiled`] wraps a subject; each `call`/`call_mut` is timed under a
//!   method name, and nested calls made through the wrapper nest in the tree
//! - [`instrument`] decorates a single callable
//!
//! Every wrapped instance of the same class shares one store.

pub mod wrapper;

// Re-export main types
pub use wrapper::{class_name, instrument, Profiled};
