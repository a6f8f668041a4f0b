//! Build collapsed stack format from the aggregate call tree.
//!
//! Collapsed stacks are the input format for external flamegraph tools.
//! Format: "parent;child;grandchild weight"
//!
//! Example: "run;parse;tokenize 1500"
//! This means: run called parse which called tokenize, spending 1500µs
//! in tokenize's own body along that path.

use crate::profile::record::{CallKey, CallTree};
use crate::utils::config::{MICROS_PER_SECOND, STACK_SEPARATOR};
use log::debug;

/// A single collapsed stack entry
///
/// **Public** - used by the collapsed writer and hot path metrics
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Weight (self time along this path, in microseconds)
    pub weight: u64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    ///
    /// **Public** - constructor
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }

    /// Render as a collapsed-format line
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Build collapsed stacks from a call tree
///
/// **Public** - main entry point for stack building
///
/// # Arguments
/// * `tree` - Root of the aggregate call tree
///
/// # Returns
/// One stack per call path with non-zero self time, heaviest first
///
/// # Algorithm
/// 1. Walk the tree depth-first, tracking the current path
/// 2. Emit each node's body time as the weight of its path
/// 3. Sort by weight (descending), then by stack for stable output
pub fn build_collapsed_stacks(tree: &CallTree) -> Vec<CollapsedStack> {
    let mut stacks = Vec::new();
    let mut path: Vec<&str> = Vec::new();

    collect_stacks(tree, &mut path, &mut stacks);

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));

    debug!("Built {} collapsed stacks", stacks.len());

    stacks
}

fn collect_stacks<'a>(tree: &'a CallTree, path: &mut Vec<&'a str>, out: &mut Vec<CollapsedStack>) {
    for (key, record) in tree {
        let CallKey::Method(name) = key else {
            continue;
        };

        path.push(name);

        // Nodes built by hand may lack a body entry; treat them as all self time
        let self_time = match record.children.get(&CallKey::Body) {
            Some(body) => body.total_time,
            None => (record.total_time - record.subcall_time()).max(0.0),
        };
        let weight = to_micros(self_time);
        if weight > 0 {
            let separator = STACK_SEPARATOR.to_string();
            out.push(CollapsedStack::new(path.join(&separator), weight));
        }

        collect_stacks(&record.children, path, out);
        path.pop();
    }
}

fn to_micros(seconds: f64) -> u64 {
    (seconds * MICROS_PER_SECOND).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::record::ProfileRecord;

    #[test]
    fn test_collapsed_stack_to_line() {
        let stack = CollapsedStack::new("run;parse;tokenize".to_string(), 1000);
        assert_eq!(stack.to_line(), "run;parse;tokenize 1000");
    }

    #[test]
    fn test_build_collapsed_stacks_from_tree() {
        let mut a = ProfileRecord {
            total_time: 0.2,
            call_count: 1,
            children: CallTree::new(),
        };
        a.children.insert(CallKey::method("B"), {
            let mut b = ProfileRecord::leaf(0.1);
            b.children.insert(CallKey::Body, ProfileRecord::leaf(0.1));
            b
        });
        a.children.insert(CallKey::Body, ProfileRecord::leaf(0.1));

        let mut tree = CallTree::new();
        tree.insert(CallKey::method("A"), a);

        let stacks = build_collapsed_stacks(&tree);

        assert_eq!(
            stacks,
            vec![
                CollapsedStack::new("A".to_string(), 100_000),
                CollapsedStack::new("A;B".to_string(), 100_000),
            ]
        );
    }

    #[test]
    fn test_zero_self_time_paths_are_skipped() {
        let mut tree = CallTree::new();
        tree.insert(CallKey::method("idle"), ProfileRecord::leaf(0.0));

        assert!(build_collapsed_stacks(&tree).is_empty());
    }
}
