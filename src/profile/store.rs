//! Per-class profile storage.
//!
//! A [`ClassProfileStore`] holds the aggregate shared by every wrapped
//! instance of one class: the raw per-call durations and the merged call
//! tree. Active call stacks are kept per calling thread so that concurrent
//! call chains never interleave frames; only the aggregate is shared.
//!
//! Lock order is always `stacks` then `data`.
//!
//! A thread's stack entry is removed once its last frame closes. Frames
//! opened with a raw [`ClassProfileStore::push`] and never popped keep the
//! entry alive until [`ClassProfileStore::reset`]; guards recover on their
//! own (see [`CallGuard`]).

use super::guard::CallGuard;
use super::record::CallTree;
use super::tracker::CallStackTracker;
use crate::stats::{FlatStats, TreeStats};
use crate::utils::error::ProfileError;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

/// Aggregate profiling data for one class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    /// Method name -> every recorded duration, at any nesting depth
    pub flat_times: BTreeMap<String, Vec<f64>>,

    /// Merged call tree across all completed top-level calls
    pub root_tree: CallTree,
}

impl ProfileData {
    pub fn is_empty(&self) -> bool {
        self.flat_times.is_empty() && self.root_tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.flat_times.clear();
        self.root_tree.clear();
    }
}

/// Profiling data shared by all instances of one class
#[derive(Debug)]
pub struct ClassProfileStore {
    class_id: String,
    stacks: Mutex<HashMap<ThreadId, CallStackTracker>>,
    data: Mutex<ProfileData>,
}

impl ClassProfileStore {
    pub fn new(class_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            stacks: Mutex::new(HashMap::new()),
            data: Mutex::new(ProfileData::default()),
        }
    }

    /// Class identity this store profiles
    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    /// Open a frame for `name` on the calling thread's stack
    pub fn push(&self, name: impl Into<String>) {
        lock(&self.stacks)
            .entry(thread::current().id())
            .or_default()
            .push(name);
    }

    /// Close the calling thread's frame for `name` after `elapsed` seconds
    ///
    /// # Errors
    /// * `ProfileError::EmptyStack` - the calling thread has no open frame
    /// * `ProfileError::ProtocolViolation` - the open frame is not `name`
    pub fn pop(&self, name: &str, elapsed: f64) -> Result<f64, ProfileError> {
        let thread_id = thread::current().id();
        let mut stacks = lock(&self.stacks);

        let Some(tracker) = stacks.get_mut(&thread_id) else {
            return Err(ProfileError::EmptyStack {
                name: name.to_string(),
            });
        };

        let self_time = {
            let mut data = lock(&self.data);
            tracker.pop(name, elapsed, &mut data)?
        };

        if tracker.is_empty() {
            stacks.remove(&thread_id);
        }

        Ok(self_time)
    }

    /// Discard the calling thread's frames opened after its innermost
    /// `name` frame, returning how many were dropped
    pub fn abandon_above(&self, name: &str) -> usize {
        let thread_id = thread::current().id();
        let mut stacks = lock(&self.stacks);

        let Some(tracker) = stacks.get_mut(&thread_id) else {
            return 0;
        };
        let dropped = tracker.abandon_above(name);
        if tracker.is_empty() {
            stacks.remove(&thread_id);
        }
        dropped
    }

    /// Push `name` and return a guard that pops it when dropped
    ///
    /// Elapsed time is measured from just before the push to the drop.
    pub fn enter(self: &Arc<Self>, name: impl Into<String>) -> CallGuard {
        CallGuard::new(Arc::clone(self), name.into())
    }

    /// Depth of the calling thread's active stack
    pub fn active_depth(&self) -> usize {
        lock(&self.stacks)
            .get(&thread::current().id())
            .map(CallStackTracker::depth)
            .unwrap_or(0)
    }

    /// Number of threads with at least one open frame
    pub fn open_stacks(&self) -> usize {
        lock(&self.stacks).len()
    }

    /// Clear flat times, the call tree and every active stack
    pub fn reset(&self) {
        let mut stacks = lock(&self.stacks);
        let mut data = lock(&self.data);

        debug!(
            "Resetting profile data for {} ({} active stacks dropped)",
            self.class_id,
            stacks.len()
        );

        stacks.clear();
        data.clear();
    }

    /// Copy of the aggregate at this instant
    pub fn snapshot(&self) -> ProfileData {
        lock(&self.data).clone()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.data).is_empty()
    }

    /// Flat per-method statistics, ascending by method name
    pub fn flat_stats(&self) -> FlatStats {
        FlatStats::new(lock(&self.data).flat_times.clone())
    }

    /// Call-tree statistics in depth-first pre-order
    pub fn tree_stats(&self) -> TreeStats {
        TreeStats::new(lock(&self.data).root_tree.clone())
    }
}

/// Lock a mutex, recovering the data if a panicking holder poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
