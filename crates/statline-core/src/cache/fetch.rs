//! Fetch wrappers over [`ExpiringCache`].

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::ExpiringCache;

impl ExpiringCache {
    /// Cache-aside fetch: return the cached value if fresh, otherwise
    /// invoke `producer`, store its result, and return it.
    ///
    /// A hit never invokes the producer. A producer failure propagates to
    /// the caller and caches nothing, so the next call retries.
    pub async fn cached_fetch<T, F, Fut>(&self, key: &str, ttl: Duration, producer: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.get::<T>(key) {
            debug!(key, "Cache hit");
            return Ok(cached);
        }

        debug!(key, "Cache miss, invoking producer");
        let value = producer().await?;
        self.set(key, &value, ttl);
        Ok(value)
    }

    /// Stale-while-revalidate: return whatever is cached (possibly `None`)
    /// immediately, and refresh in the background.
    ///
    /// The refresh always writes the fresh value to the cache, but
    /// `on_fresh` fires only when the fresh value differs structurally
    /// from what was returned, so callers are not re-notified for
    /// byte-identical payloads. A failed refresh is logged and swallowed;
    /// the stale value stays authoritative until the next call.
    pub fn stale_while_revalidate<T, F, Fut, C>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
        on_fresh: C,
    ) -> Option<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        let cached = self.get::<T>(key);
        // Compare serialized forms, not identity, to decide whether the
        // refresh changed anything
        let cached_json = cached.as_ref().and_then(|v| serde_json::to_value(v).ok());

        let cache = self.clone();
        let key = key.to_string();
        let fut = producer();
        tokio::spawn(async move {
            match fut.await {
                Ok(fresh) => {
                    cache.set(&key, &fresh, ttl);
                    let fresh_json = serde_json::to_value(&fresh).ok();
                    if cached_json.is_none() || cached_json != fresh_json {
                        debug!(key, "Background revalidation produced new data");
                        on_fresh(fresh);
                    } else {
                        debug!(key, "Background revalidation unchanged");
                    }
                }
                Err(e) => {
                    warn!(key, error = %e, "Background revalidation failed");
                }
            }
        });

        cached
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    fn cache() -> ExpiringCache {
        ExpiringCache::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock::at_date(2026, 6, 1)),
        )
    }

    /// Let spawned background tasks run to completion on the
    /// current-thread test runtime.
    async fn drain_background() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_cached_fetch_hit_skips_producer() {
        let cache = cache();
        cache.set("k", &41i32, DEFAULT_TTL);

        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();
        let value = cache
            .cached_fetch("k", DEFAULT_TTL, move || async move {
                calls2.fetch_add(1, Ordering::SeqCst);
                Ok(42i32)
            })
            .await
            .unwrap();

        assert_eq!(value, 41);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cached_fetch_miss_invokes_and_stores() {
        let cache = cache();
        let value = cache
            .cached_fetch("k", DEFAULT_TTL, || async { Ok(7i32) })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(cache.get::<i32>("k"), Some(7));
    }

    #[tokio::test]
    async fn test_cached_fetch_failure_caches_nothing() {
        let cache = cache();
        let result: Result<i32> = cache
            .cached_fetch("k", DEFAULT_TTL, || async {
                Err(anyhow::anyhow!("network down"))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.get::<i32>("k"), None);

        // Next call retries the producer and succeeds
        let value = cache
            .cached_fetch("k", DEFAULT_TTL, || async { Ok(9i32) })
            .await
            .unwrap();
        assert_eq!(value, 9);
    }

    #[tokio::test]
    async fn test_swr_returns_without_awaiting_producer() {
        let cache = cache();
        cache.set("k", &1i32, DEFAULT_TTL);

        // A producer that never resolves must not prevent the call from
        // returning the cached value
        let value = cache.stale_while_revalidate(
            "k",
            DEFAULT_TTL,
            || std::future::pending::<Result<i32>>(),
            |_| {},
        );
        assert_eq!(value, Some(1));
    }

    #[tokio::test]
    async fn test_swr_notifies_on_changed_value() {
        let cache = cache();
        cache.set("k", &serde_json::json!({"a": 1}), DEFAULT_TTL);

        let notified = Arc::new(AtomicUsize::new(0));
        let notified2 = notified.clone();
        let cached = cache.stale_while_revalidate(
            "k",
            DEFAULT_TTL,
            || async { Ok(serde_json::json!({"a": 2})) },
            move |fresh| {
                assert_eq!(fresh, serde_json::json!({"a": 2}));
                notified2.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert_eq!(cached, Some(serde_json::json!({"a": 1})));

        drain_background().await;
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        // Cache was refreshed
        assert_eq!(
            cache.get::<serde_json::Value>("k"),
            Some(serde_json::json!({"a": 2}))
        );
    }

    #[tokio::test]
    async fn test_swr_silent_when_value_structurally_equal() {
        let cache = cache();
        cache.set("k", &serde_json::json!({"a": 1}), DEFAULT_TTL);

        let notified = Arc::new(AtomicUsize::new(0));
        let notified2 = notified.clone();
        cache.stale_while_revalidate(
            "k",
            DEFAULT_TTL,
            || async { Ok(serde_json::json!({"a": 1})) },
            move |_: serde_json::Value| {
                notified2.fetch_add(1, Ordering::SeqCst);
            },
        );

        drain_background().await;
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_swr_cold_cache_notifies_once() {
        let cache = cache();
        let notified = Arc::new(AtomicUsize::new(0));
        let notified2 = notified.clone();

        let cached = cache.stale_while_revalidate(
            "k",
            DEFAULT_TTL,
            || async { Ok(5i32) },
            move |fresh| {
                assert_eq!(fresh, 5);
                notified2.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert_eq!(cached, None);

        drain_background().await;
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get::<i32>("k"), Some(5));
    }

    #[tokio::test]
    async fn test_swr_producer_failure_keeps_stale_value() {
        let cache = cache();
        cache.set("k", &1i32, DEFAULT_TTL);

        let notified = Arc::new(AtomicUsize::new(0));
        let notified2 = notified.clone();
        let cached = cache.stale_while_revalidate(
            "k",
            DEFAULT_TTL,
            || async { Err(anyhow::anyhow!("remote down")) },
            move |_: i32| {
                notified2.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert_eq!(cached, Some(1));

        drain_background().await;
        assert_eq!(notified.load(Ordering::SeqCst), 0);
        assert_eq!(cache.get::<i32>("k"), Some(1));
    }
}
