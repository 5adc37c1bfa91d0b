//! In-memory resource store
//!
//! Maps resolved disk paths to shared, immutable resources. Growth is
//! unbounded on purpose: there is no eviction, expiry, or size cap, only
//! bulk teardown via `clear`.

use crate::types::Resource;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Cache of loaded resources keyed by absolute disk path
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<String, Arc<Resource>>,
    total_bytes: u64,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a resource by key, cloning the shared handle on a hit
    pub fn get(&self, key: &str) -> Option<Arc<Resource>> {
        self.entries.get(key).cloned()
    }

    /// Store a resource under `key`. A duplicate key replaces the previous
    /// entry (last insert wins).
    pub fn insert(&mut self, key: String, resource: Arc<Resource>) {
        let size = resource.len() as u64;
        debug!(key = %key, size, "Cached resource");
        if let Some(previous) = self.entries.insert(key, resource) {
            self.total_bytes -= previous.len() as u64;
        }
        self.total_bytes += size;
    }

    /// Drop every cached resource and empty the map
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "Clearing resource cache");
        self.entries.clear();
        self.total_bytes = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes held across all cached resources
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}
