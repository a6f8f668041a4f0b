//! Accumulated call-time records and the merge that builds the call tree.
//!
//! A [`ProfileRecord`] is one node of the aggregate tree: the total time and
//! number of calls for a method at a specific call path, plus the calls it
//! made. The [`CallKey::Body`] child holds time spent in the method's own body.

use crate::utils::config::BODY_LABEL;
use std::collections::BTreeMap;
use std::fmt;

/// Key of a child entry in a call tree
///
/// `Body` sorts before every method name in map order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CallKey {
    /// Time spent in the caller's own body
    Body,

    /// A subordinate method call
    Method(String),
}

impl CallKey {
    /// Create a key for a named method
    pub fn method(name: impl Into<String>) -> Self {
        CallKey::Method(name.into())
    }

    /// Label used in reports; the body marker becomes `(body)`
    pub fn label(&self) -> &str {
        match self {
            CallKey::Body => BODY_LABEL,
            CallKey::Method(name) => name,
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, CallKey::Body)
    }
}

impl fmt::Display for CallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Children of a call tree node, keyed by method or body marker
pub type CallTree = BTreeMap<CallKey, ProfileRecord>;

/// Accumulated statistics for one method at one position in the call tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRecord {
    /// Cumulative elapsed seconds across all merged calls
    pub total_time: f64,

    /// Number of calls merged into this node
    pub call_count: u64,

    /// Subordinate calls, plus the `Body` entry for self time
    pub children: CallTree,
}

impl ProfileRecord {
    /// Record for a single completed call with no subordinate calls
    pub fn leaf(total_time: f64) -> Self {
        Self {
            total_time,
            call_count: 1,
            children: CallTree::new(),
        }
    }

    /// Time spent in the method's own body, if any was recorded
    pub fn self_time(&self) -> f64 {
        self.children
            .get(&CallKey::Body)
            .map(|body| body.total_time)
            .unwrap_or(0.0)
    }

    /// Sum of time spent in named subordinate calls
    pub fn subcall_time(&self) -> f64 {
        subcall_time(&self.children)
    }

    /// True when the only child is the node's own body time
    pub fn is_leaf(&self) -> bool {
        self.children.len() <= 1
    }
}

/// Sum the totals of every non-body entry
pub fn subcall_time(children: &CallTree) -> f64 {
    children
        .iter()
        .filter(|(key, _)| !key.is_body())
        .map(|(_, record)| record.total_time)
        .sum()
}

/// Merge a call-time record into `target` under `key`
///
/// Creates a zeroed entry if needed, adds `delta` and `count`, then merges
/// every entry of `subcalls` into the entry's children recursively.
/// Merging is associative and commutative, so repeated calls accumulate
/// the same totals in any order.
pub fn merge_into(
    target: &mut CallTree,
    key: CallKey,
    delta: f64,
    count: u64,
    subcalls: &CallTree,
) {
    let entry = target.entry(key).or_default();
    entry.total_time += delta;
    entry.call_count += count;

    for (child_key, child) in subcalls {
        merge_into(
            &mut entry.children,
            child_key.clone(),
            child.total_time,
            child.call_count,
            &child.children,
        );
    }
}

/// Merge an entire tree into another
pub fn merge_tree(target: &mut CallTree, source: &CallTree) {
    for (key, record) in source {
        merge_into(
            target,
            key.clone(),
            record.total_time,
            record.call_count,
            &record.children,
        );
    }
}
