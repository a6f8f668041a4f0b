//! Registry mapping class identities to their profile stores.
//!
//! The registry is an explicit object so tests and callers can isolate
//! profiling state. [`ProfileRegistry::global`] exists for callers that want
//! a single process-wide registry.

use super::store::ClassProfileStore;
use crate::stats::{FlatStats, TreeStats};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Class identity -> shared profile store
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    stores: Mutex<HashMap<String, Arc<ClassProfileStore>>>,
}

static GLOBAL: OnceLock<ProfileRegistry> = OnceLock::new();

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use
    pub fn global() -> &'static ProfileRegistry {
        GLOBAL.get_or_init(ProfileRegistry::new)
    }

    /// Store for `class_id`, created on first access
    pub fn get_or_create(&self, class_id: &str) -> Arc<ClassProfileStore> {
        let mut stores = self.stores();
        if let Some(store) = stores.get(class_id) {
            return Arc::clone(store);
        }

        debug!("Registering profile store for class {}", class_id);
        let store = Arc::new(ClassProfileStore::new(class_id));
        stores.insert(class_id.to_string(), Arc::clone(&store));
        store
    }

    /// Store for `class_id`, if one was ever registered
    pub fn get(&self, class_id: &str) -> Option<Arc<ClassProfileStore>> {
        self.stores().get(class_id).cloned()
    }

    /// Registered class identities, ascending
    pub fn class_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.stores().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Flat statistics for `class_id`; empty for unknown classes
    pub fn flat_stats(&self, class_id: &str) -> FlatStats {
        self.get(class_id)
            .map(|store| store.flat_stats())
            .unwrap_or_default()
    }

    /// Tree statistics for `class_id`; empty for unknown classes
    pub fn tree_stats(&self, class_id: &str) -> TreeStats {
        self.get(class_id)
            .map(|store| store.tree_stats())
            .unwrap_or_default()
    }

    /// Reset every registered store, keeping the registrations
    pub fn reset_all(&self) {
        for store in self.stores().values() {
            store.reset();
        }
    }

    /// Forget every registered store
    ///
    /// Wrappers still holding a store keep recording into it, detached
    /// from this registry.
    pub fn clear(&self) {
        self.stores().clear();
    }

    pub fn len(&self) -> usize {
        self.stores().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores().is_empty()
    }

    fn stores(&self) -> MutexGuard<'_, HashMap<String, Arc<ClassProfileStore>>> {
        self.stores.lock().unwrap_or_else(|e| e.into_inner())
    }
}
