//! Flat per-method statistics.
//!
//! Ignores call nesting: every recorded duration of a method counts,
//! whatever its depth in the call tree.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Aggregate timing for one method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatStat {
    pub method: String,

    /// Number of recorded calls
    pub calls: u64,

    /// Sum of all call durations, in seconds
    pub total_time: f64,

    /// Mean call duration, in seconds
    pub avg_time: f64,
}

/// Lazy sequence of [`FlatStat`], ascending by method name
///
/// Built from a snapshot, so it is unaffected by calls recorded after it
/// was created. Ask the store again for a fresh sequence.
#[derive(Debug)]
pub struct FlatStats {
    methods: btree_map::IntoIter<String, Vec<f64>>,
}

impl FlatStats {
    pub fn new(flat_times: BTreeMap<String, Vec<f64>>) -> Self {
        Self {
            methods: flat_times.into_iter(),
        }
    }
}

impl Default for FlatStats {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl Iterator for FlatStats {
    type Item = FlatStat;

    fn next(&mut self) -> Option<FlatStat> {
        loop {
            let (method, durations) = self.methods.next()?;
            if durations.is_empty() {
                continue;
            }

            let calls = durations.len() as u64;
            let total_time: f64 = durations.iter().sum();
            return Some(FlatStat {
                method,
                calls,
                total_time,
                avg_time: total_time / calls as f64,
            });
        }
    }
}
