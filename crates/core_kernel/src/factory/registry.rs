//! Entity Registry
//!
//! An append-only identity cache mapping `(kind, key)` to a resolved entity.
//! One instance may be reachable under several keys (aliasing). Keys are
//! never evicted and never rebound to another instance for the lifetime of
//! the registry, which is meant to be one resolution session such as a
//! request or a batch job.
//!
//! The registry is not synchronized. The find-build-register sequence run
//! by the factory is not atomic, so concurrent users need their own
//! registry or an external lock.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::entity::EntityRef;
use super::keys::CacheKey;

#[derive(Debug, Default)]
pub struct EntityRegistry {
    entries: HashMap<String, HashMap<CacheKey, EntityRef>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes `keys` in order and returns the first hit
    pub fn find(&self, kind: &str, keys: &[CacheKey]) -> Option<EntityRef> {
        let entities = self.entries.get(kind)?;
        keys.iter().find_map(|key| entities.get(key)).cloned()
    }

    /// Binds `entity` under every key that is not bound yet
    ///
    /// Re-registering the same instance is a no-op. A key already bound to a
    /// different instance keeps its original binding.
    pub fn register(&mut self, kind: &str, entity: &EntityRef, keys: &[CacheKey]) {
        let entities = self.entries.entry(kind.to_string()).or_default();
        for key in keys {
            match entities.get(key) {
                Some(existing) if existing.ptr_eq(entity) => {}
                Some(_) => {
                    warn!(kind, key = %key, "key already bound to another instance, keeping original");
                }
                None => {
                    debug!(kind, key = %key, "registering entity");
                    entities.insert(key.clone(), entity.clone());
                }
            }
        }
    }

    /// Number of bound keys for a kind
    pub fn key_count(&self, kind: &str) -> usize {
        self.entries.get(kind).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }

    /// Drops every binding, ending the resolution session
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
