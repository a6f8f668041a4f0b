//! Calculate hot paths from collapsed stacks.
//!
//! Hot paths are the call paths with the most self time.
//! These are the primary targets for optimization.

use super::stack_builder::CollapsedStack;
use log::debug;
use serde::{Deserialize, Serialize};

/// A hot path in the call tree (stack with self time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Collapsed stack representation (e.g., "run;parse;tokenize")
    pub stack: String,

    /// Self time along this path, in microseconds
    pub micros: u64,

    /// Percentage of total profiled time
    pub percentage: f64,
}

/// Calculate hot paths from collapsed stacks
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `stacks` - Collapsed stacks from stack_builder
/// * `total_micros` - Total profiled time
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Vector of hot paths, sorted by self time (descending)
pub fn calculate_hot_paths(
    stacks: &[CollapsedStack],
    total_micros: u64,
    top_n: usize,
) -> Vec<HotPath> {
    debug!("Calculating top {} hot paths from {} stacks", top_n, stacks.len());

    // Stacks are already sorted by weight from stack_builder
    stacks
        .iter()
        .take(top_n)
        .map(|stack| create_hot_path(stack, total_micros))
        .collect()
}

/// Create a HotPath from a CollapsedStack
///
/// **Public** - exposed for integration tests
pub fn create_hot_path(stack: &CollapsedStack, total_micros: u64) -> HotPath {
    let percentage = if total_micros > 0 {
        (stack.weight as f64 / total_micros as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: stack.stack.clone(),
        micros: stack.weight,
        percentage,
    }
}

/// Sum of all stack weights
pub fn total_weight(stacks: &[CollapsedStack]) -> u64 {
    stacks.iter().map(|s| s.weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_hot_paths() {
        let stacks = vec![
            CollapsedStack::new("run;parse".to_string(), 5000),
            CollapsedStack::new("run;emit".to_string(), 3000),
            CollapsedStack::new("run;load".to_string(), 2000),
        ];

        let hot_paths = calculate_hot_paths(&stacks, 10000, 2);

        assert_eq!(hot_paths.len(), 2);
        assert_eq!(hot_paths[0].stack, "run;parse");
        assert_eq!(hot_paths[0].micros, 5000);
        assert_eq!(hot_paths[0].percentage, 50.0);
    }

    #[test]
    fn test_create_hot_path_zero_total() {
        let stack = CollapsedStack::new("test;path".to_string(), 2500);
        let hot_path = create_hot_path(&stack, 0);

        assert_eq!(hot_path.percentage, 0.0);
    }

    #[test]
    fn test_total_weight() {
        let stacks = vec![
            CollapsedStack::new("a".to_string(), 7),
            CollapsedStack::new("a;b".to_string(), 3),
        ];
        assert_eq!(total_weight(&stacks), 10);
    }
}
