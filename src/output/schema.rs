//! Report JSON schema definitions.
//!
//! This module defines the structure of report files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{build_collapsed_stacks, calculate_hot_paths, total_weight, HotPath};
use crate::profile::ClassProfileStore;
use crate::stats::{FlatStat, FlatStats, TreeStat, TreeStats};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Class identity that was profiled
    pub class_id: String,

    /// Flat per-method statistics, ascending by method
    pub flat: Vec<FlatStat>,

    /// Call tree statistics in pre-order
    pub tree: Vec<TreeStat>,

    /// Top hot paths (ranked by self time)
    pub hot_paths: Vec<HotPath>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl ProfileReport {
    /// Build a report from the current state of a store
    ///
    /// **Public** - main entry point for report creation
    ///
    /// Every section is derived from one snapshot, so calls completing
    /// concurrently never split the report across two states.
    pub fn from_store(store: &ClassProfileStore, top_paths: usize) -> Self {
        let data = store.snapshot();
        let stacks = build_collapsed_stacks(&data.root_tree);

        Self {
            version: SCHEMA_VERSION.to_string(),
            class_id: store.class_id().to_string(),
            flat: FlatStats::new(data.flat_times).collect(),
            tree: TreeStats::new(data.root_tree).collect(),
            hot_paths: calculate_hot_paths(&stacks, total_weight(&stacks), top_paths),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Total number of recorded calls across all methods
    pub fn total_calls(&self) -> u64 {
        self.flat.iter().map(|stat| stat.calls).sum()
    }

    /// Sum of top-level call time, in seconds
    pub fn total_time(&self) -> f64 {
        self.tree
            .iter()
            .filter(|stat| stat.level == 0)
            .map(|stat| stat.time)
            .sum()
    }
}
