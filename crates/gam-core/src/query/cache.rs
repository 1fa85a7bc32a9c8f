// ── Query cache ──

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use super::key::{QueryKey, Resource};

/// Default window inside which a cached entry is served without
/// refetching.
pub const DEFAULT_STALENESS: Duration = Duration::from_secs(30);

/// What a completed mutation makes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationScope {
    /// All queries against one resource, whatever their params.
    Resource(Resource),
    /// A single entity plus the collections that list it.
    Entity(Resource, i64),
    /// Everything scoped to one device: its detail, its ports,
    /// endpoints, subscribers, bandwidths, backups and alarms.
    Device(i64),
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

/// Concurrent read-through cache keyed by [`QueryKey`]. Values are
/// stored type-erased; `get` downcasts back to the caller's type.
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    staleness: Duration,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_staleness(DEFAULT_STALENESS)
    }

    pub fn with_staleness(staleness: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            staleness,
        }
    }

    /// Fresh cached value for `key`, if present. Stale entries are
    /// treated as absent (and left in place for the writer to replace).
    pub fn get<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entry = self.entries.get(key)?;
        if entry.fetched_at.elapsed() > self.staleness {
            return None;
        }
        entry.value.clone().downcast::<T>().ok()
    }

    pub fn put<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
        );
        value
    }

    /// Drop every entry the scope covers. Idempotent; invalidating an
    /// already-empty scope is a no-op.
    pub fn invalidate(&self, scope: InvalidationScope) {
        let before = self.entries.len();
        self.entries.retain(|key, _| !Self::covers(scope, key));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!(?scope, dropped, "invalidated cached queries");
        }
    }

    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    fn covers(scope: InvalidationScope, key: &QueryKey) -> bool {
        match scope {
            InvalidationScope::Resource(resource) => key.resource == resource,
            InvalidationScope::Entity(resource, id) => {
                key.resource == resource
                    && (key.entity_id() == Some(id) || key.entity_id().is_none())
            }
            InvalidationScope::Device(device_id) => {
                key.device_id() == Some(device_id)
                    || (key.resource == Resource::Devices
                        && key.entity_id() == Some(device_id))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_fresh_put_value() {
        let cache = QueryCache::new();
        let key = QueryKey::new(Resource::Devices);
        cache.put(key.clone(), vec![1u32, 2, 3]);
        let got: Arc<Vec<u32>> = cache.get(&key).expect("fresh entry");
        assert_eq!(*got, vec![1, 2, 3]);
    }

    #[test]
    fn stale_entries_are_absent() {
        let cache = QueryCache::with_staleness(Duration::ZERO);
        let key = QueryKey::new(Resource::Alarms);
        cache.put(key.clone(), 42u64);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get::<u64>(&key).is_none());
    }

    #[test]
    fn resource_scope_drops_all_params_variants() {
        let cache = QueryCache::new();
        cache.put(QueryKey::new(Resource::Devices), 1u8);
        cache.put(QueryKey::entity(Resource::Devices, 7), 2u8);
        cache.put(QueryKey::new(Resource::Alarms), 3u8);

        cache.invalidate(InvalidationScope::Resource(Resource::Devices));
        assert_eq!(cache.len(), 1);
        assert!(cache.get::<u8>(&QueryKey::new(Resource::Alarms)).is_some());
    }

    #[test]
    fn entity_scope_drops_entity_and_collections() {
        let cache = QueryCache::new();
        cache.put(QueryKey::entity(Resource::Subscribers, 5), 1u8);
        cache.put(QueryKey::entity(Resource::Subscribers, 6), 2u8);
        cache.put(QueryKey::new(Resource::Subscribers), 3u8);

        cache.invalidate(InvalidationScope::Entity(Resource::Subscribers, 5));
        assert!(cache
            .get::<u8>(&QueryKey::entity(Resource::Subscribers, 5))
            .is_none());
        // Collection listings are stale too, sibling entities are not.
        assert!(cache.get::<u8>(&QueryKey::new(Resource::Subscribers)).is_none());
        assert!(cache
            .get::<u8>(&QueryKey::entity(Resource::Subscribers, 6))
            .is_some());
    }

    #[test]
    fn device_scope_drops_everything_under_the_device() {
        let cache = QueryCache::new();
        cache.put(QueryKey::entity(Resource::Devices, 3), 1u8);
        cache.put(QueryKey::device_scoped(Resource::Ports, 3), 2u8);
        cache.put(QueryKey::device_scoped(Resource::Endpoints, 3), 3u8);
        cache.put(QueryKey::device_scoped(Resource::Ports, 4), 4u8);

        cache.invalidate(InvalidationScope::Device(3));
        assert_eq!(cache.len(), 1);
        assert!(cache
            .get::<u8>(&QueryKey::device_scoped(Resource::Ports, 4))
            .is_some());
    }

    #[test]
    fn invalidation_is_idempotent() {
        let cache = QueryCache::new();
        cache.put(QueryKey::new(Resource::Users), 1u8);
        cache.invalidate(InvalidationScope::Resource(Resource::Users));
        cache.invalidate(InvalidationScope::Resource(Resource::Users));
        assert_eq!(cache.len(), 0);
    }
}
