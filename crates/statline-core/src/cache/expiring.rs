use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::store::{KeyValueStore, StoreError};

/// Consider cached data stale after 1 hour.
/// Balances freshness with reducing unnecessary API calls for slowly-changing data.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// TTL for completed seasons, which never change.
pub const HISTORICAL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Prefix on every key so the cache can share a store with unrelated data
/// and still sweep or clear only its own entries.
const NAMESPACE: &str = "statline:";

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    value: serde_json::Value,
    /// Milliseconds since epoch when written.
    stored_at: i64,
    ttl_ms: i64,
}

impl CacheEntry {
    fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.stored_at > self.ttl_ms
    }
}

/// TTL cache for JSON-serializable values.
///
/// Reads never fail: an expired or unreadable entry is removed and reported
/// as a miss. Writes never fail either; on quota exhaustion the cache
/// sweeps its expired entries and retries once, then drops the write.
#[derive(Clone)]
pub struct ExpiringCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl ExpiringCache {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", NAMESPACE, key)
    }

    /// Look up a value, treating expired and corrupt entries as misses.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let ns_key = Self::namespaced(key);
        let raw = self.store.get(&ns_key)?;

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key, error = %e, "Removing corrupt cache entry");
                self.store.remove(&ns_key);
                return None;
            }
        };

        if entry.is_expired(self.clock.now_ms()) {
            self.store.remove(&ns_key);
            return None;
        }

        match serde_json::from_value(entry.value) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key, error = %e, "Cache entry no longer matches expected shape");
                self.store.remove(&ns_key);
                None
            }
        }
    }

    /// Store a value with the given TTL. Persistence failures are logged
    /// and swallowed; the caller's data is unaffected.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize value for cache");
                return;
            }
        };
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now_ms(),
            ttl_ms: ttl.as_millis() as i64,
        };
        let payload = match serde_json::to_string(&entry) {
            Ok(p) => p,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        let ns_key = Self::namespaced(key);
        match self.store.set(&ns_key, &payload) {
            Ok(()) => {}
            Err(StoreError::QuotaExceeded) => {
                debug!(key, "Store quota exceeded, sweeping expired entries");
                self.sweep_expired();
                if let Err(e) = self.store.set(&ns_key, &payload) {
                    warn!(key, error = %e, "Dropping cache write after sweep");
                }
            }
            Err(e) => {
                warn!(key, error = %e, "Dropping cache write");
            }
        }
    }

    /// Remove every namespaced entry that has outlived its TTL, plus any
    /// that can no longer be parsed.
    pub fn sweep_expired(&self) {
        let now_ms = self.clock.now_ms();
        let mut removed = 0usize;

        for ns_key in self.store.keys() {
            if !ns_key.starts_with(NAMESPACE) {
                continue;
            }
            let Some(raw) = self.store.get(&ns_key) else {
                continue;
            };
            let expired = match serde_json::from_str::<CacheEntry>(&raw) {
                Ok(entry) => entry.is_expired(now_ms),
                Err(_) => true,
            };
            if expired {
                self.store.remove(&ns_key);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(removed, "Swept expired cache entries");
        }
    }

    /// Remove every namespaced entry regardless of expiry.
    pub fn clear_all(&self) {
        for ns_key in self.store.keys() {
            if ns_key.starts_with(NAMESPACE) {
                self.store.remove(&ns_key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    fn cache_with_clock() -> (ExpiringCache, Arc<FixedClock>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::at_date(2026, 6, 1));
        let cache = ExpiringCache::new(store.clone(), clock.clone());
        (cache, clock, store)
    }

    #[test]
    fn test_get_within_ttl_returns_value() {
        let (cache, _, _) = cache_with_clock();
        cache.set("k", &vec![1, 2, 3], DEFAULT_TTL);
        assert_eq!(cache.get::<Vec<i32>>("k"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_entry_expires_and_is_removed_from_store() {
        let (cache, clock, store) = cache_with_clock();
        cache.set("k", &"v".to_string(), Duration::from_millis(500));

        clock.advance(chrono::Duration::milliseconds(501));
        assert_eq!(cache.get::<String>("k"), None);
        // Lazy removal: the underlying entry is gone too
        assert_eq!(store.get("statline:k"), None);
    }

    #[test]
    fn test_entry_valid_at_exact_ttl_boundary() {
        let (cache, clock, _) = cache_with_clock();
        cache.set("k", &1i32, Duration::from_millis(500));
        clock.advance(chrono::Duration::milliseconds(500));
        assert_eq!(cache.get::<i32>("k"), Some(1));
    }

    #[test]
    fn test_corrupt_entry_is_a_miss_and_removed() {
        let (cache, _, store) = cache_with_clock();
        store.set("statline:bad", "{not json").unwrap();
        assert_eq!(cache.get::<String>("bad"), None);
        assert_eq!(store.get("statline:bad"), None);
    }

    #[test]
    fn test_sweep_removes_only_expired_namespaced_entries() {
        let (cache, clock, store) = cache_with_clock();
        cache.set("old", &1i32, Duration::from_millis(100));
        cache.set("fresh", &2i32, DEFAULT_TTL);
        store.set("unrelated", "keep").unwrap();

        clock.advance(chrono::Duration::milliseconds(200));
        cache.sweep_expired();

        assert_eq!(store.get("statline:old"), None);
        assert!(store.get("statline:fresh").is_some());
        assert_eq!(store.get("unrelated"), Some("keep".to_string()));
    }

    #[test]
    fn test_clear_all_scoped_to_namespace() {
        let (cache, _, store) = cache_with_clock();
        cache.set("a", &1i32, DEFAULT_TTL);
        cache.set("b", &2i32, DEFAULT_TTL);
        store.set("unrelated", "keep").unwrap();

        cache.clear_all();
        assert_eq!(cache.get::<i32>("a"), None);
        assert_eq!(cache.get::<i32>("b"), None);
        assert_eq!(store.get("unrelated"), Some("keep".to_string()));
    }

    #[test]
    fn test_quota_recovery_sweeps_and_retries() {
        let store = Arc::new(MemoryStore::with_quota(200));
        let clock = Arc::new(FixedClock::at_date(2026, 6, 1));
        let cache = ExpiringCache::new(store.clone(), clock.clone());

        // Fill most of the quota with an entry that will expire
        cache.set("old", &"x".repeat(80), Duration::from_millis(100));
        assert!(store.get("statline:old").is_some());

        clock.advance(chrono::Duration::milliseconds(200));

        // This write exceeds the quota until the expired entry is swept
        cache.set("new", &"y".repeat(80), DEFAULT_TTL);
        assert_eq!(cache.get::<String>("new"), Some("y".repeat(80)));
        assert_eq!(store.get("statline:old"), None);
    }

    #[test]
    fn test_write_dropped_silently_when_sweep_cannot_help() {
        let store = Arc::new(MemoryStore::with_quota(40));
        let clock = Arc::new(FixedClock::at_date(2026, 6, 1));
        let cache = ExpiringCache::new(store, clock);

        // Far larger than the quota; set must not panic or error
        cache.set("big", &"z".repeat(500), DEFAULT_TTL);
        assert_eq!(cache.get::<String>("big"), None);
    }
}
