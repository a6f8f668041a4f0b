//! Hierarchical call-tree statistics.
//!
//! The tree is flattened into a depth-first pre-order sequence. Siblings are
//! ordered by time descending, and each entry's
//! percentage is relative to the summed time of its siblings. Ties put named
//! calls before the body entry, then order names ascending. A node is only
//! descended into when it made subordinate calls; a node whose only child is
//! its own body time is reported as a leaf.

use crate::profile::record::{CallKey, CallTree, ProfileRecord};
use serde::{Deserialize, Serialize};
use std::vec;

/// One node of the call tree, as reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeStat {
    /// Distance from the root
    pub level: usize,

    /// Method name, or `(body)` for the caller's own body time
    pub method: String,

    /// Total time of the node, in seconds
    pub time: f64,

    pub calls: u64,

    /// Share of the summed time of this node and its siblings
    pub percent: f64,
}

/// Lazy pre-order walk over a call tree snapshot
#[derive(Debug, Default)]
pub struct TreeStats {
    levels: Vec<vec::IntoIter<(TreeStat, CallTree)>>,
}

impl TreeStats {
    pub fn new(root: CallTree) -> Self {
        Self {
            levels: vec![sibling_stats(root, 0).into_iter()],
        }
    }
}

impl Iterator for TreeStats {
    type Item = TreeStat;

    fn next(&mut self) -> Option<TreeStat> {
        loop {
            let siblings = self.levels.last_mut()?;
            match siblings.next() {
                Some((stat, children)) => {
                    if children.len() > 1 {
                        self.levels
                            .push(sibling_stats(children, stat.level + 1).into_iter());
                    }
                    return Some(stat);
                }
                None => {
                    self.levels.pop();
                }
            }
        }
    }
}

/// Order one sibling set and compute each entry's percentage
fn sibling_stats(tree: CallTree, level: usize) -> Vec<(TreeStat, CallTree)> {
    let total: f64 = tree.values().map(|record| record.total_time).sum();

    let mut entries: Vec<(CallKey, ProfileRecord)> = tree.into_iter().collect();
    entries.sort_by(|(key_a, a), (key_b, b)| {
        b.total_time
            .total_cmp(&a.total_time)
            .then_with(|| key_a.is_body().cmp(&key_b.is_body()))
            .then_with(|| key_a.label().cmp(key_b.label()))
    });

    entries
        .into_iter()
        .map(|(key, record)| {
            let percent = if total > 0.0 {
                record.total_time / total * 100.0
            } else {
                0.0
            };
            let stat = TreeStat {
                level,
                method: key.label().to_string(),
                time: record.total_time,
                calls: record.call_count,
                percent,
            };
            (stat, record.children)
        })
        .collect()
}
