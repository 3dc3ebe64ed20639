//! Typed, fail-open wrapper around a [`CacheService`].
//!
//! Every call is bounded by the configured timeout. Failures of any kind
//! (transport, timeout, (de)serialization) are logged and counted, then
//! turned into a miss for reads and a no-op for writes, so a cache outage
//! only costs latency.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::keys::CacheKeys;
use super::service::{CacheResult, CacheService};

/// Immutable cache configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Namespace prepended to every key.
    pub key_prefix: String,
    /// Lifetime of cached views and existence flags.
    pub ttl: Duration,
    /// Upper bound for a single cache round-trip.
    pub op_timeout: Duration,
    /// Upper bound for a prefix sweep, which may take several round-trips.
    pub sweep_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            key_prefix: "favorites".to_string(),
            ttl: Duration::from_secs(3600),
            op_timeout: Duration::from_millis(250),
            sweep_timeout: Duration::from_secs(2),
        }
    }
}

/// Cache adapter used by the favorites service.
#[derive(Clone)]
pub struct FavoritesCache {
    store: Arc<dyn CacheService>,
    keys: CacheKeys,
    ttl: Duration,
    op_timeout: Duration,
    sweep_timeout: Duration,
}

impl FavoritesCache {
    pub fn new(store: Arc<dyn CacheService>, settings: CacheSettings) -> Self {
        Self {
            store,
            keys: CacheKeys::new(settings.key_prefix),
            ttl: settings.ttl,
            op_timeout: settings.op_timeout,
            sweep_timeout: settings.sweep_timeout,
        }
    }

    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    /// Configured TTL for entries written by the service.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Reads and deserializes a value.
    ///
    /// Returns `None` on miss, expiry, backend error, timeout, or when the
    /// stored payload no longer deserializes into `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let Some(raw) = self.bounded("get", key, self.op_timeout, self.store.get(key))
            .await
            .flatten()
        else {
            debug!(key, "Cache MISS");
            metrics::counter!("favorites_cache_misses_total").increment(1);
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "Cache HIT");
                metrics::counter!("favorites_cache_hits_total").increment(1);
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                metrics::counter!("favorites_cache_errors_total", "op" => "decode").increment(1);
                None
            }
        }
    }

    /// Serializes and stores a value with the given TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize value for caching");
                metrics::counter!("favorites_cache_errors_total", "op" => "encode").increment(1);
                return;
            }
        };

        if self
            .bounded("set", key, self.op_timeout, self.store.set(key, &raw, ttl))
            .await
            .is_some()
        {
            debug!(key, ttl_secs = ttl.as_secs(), "Cache SET");
        }
    }

    /// Removes a key. Missing keys are fine.
    pub async fn delete(&self, key: &str) {
        if let Some(existed) = self
            .bounded("delete", key, self.op_timeout, self.store.delete(key))
            .await
        {
            debug!(key, existed, "Cache INVALIDATE");
        }
    }

    /// Removes every key under `prefix`.
    ///
    /// Bounded by the sweep timeout rather than the per-call one. Returns the
    /// number of removed keys, or `None` if the sweep failed or timed out and
    /// keys under `prefix` may survive until their TTL.
    pub async fn delete_by_prefix(&self, prefix: &str) -> Option<u64> {
        let removed = self
            .bounded(
                "delete_by_prefix",
                prefix,
                self.sweep_timeout,
                self.store.delete_by_prefix(prefix),
            )
            .await;

        if let Some(removed) = removed {
            debug!(prefix, removed, "Cache INVALIDATE by prefix");
        }
        removed
    }

    pub async fn health_check(&self) -> bool {
        tokio::time::timeout(self.op_timeout, self.store.health_check())
            .await
            .unwrap_or(false)
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        key: &str,
        limit: Duration,
        fut: impl Future<Output = CacheResult<T>>,
    ) -> Option<T> {
        match tokio::time::timeout(limit, fut).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!(op, key, error = %e, "Cache operation failed");
                metrics::counter!("favorites_cache_errors_total", "op" => op).increment(1);
                None
            }
            Err(_) => {
                warn!(
                    op,
                    key,
                    timeout_ms = limit.as_millis() as u64,
                    "Cache operation timed out"
                );
                metrics::counter!("favorites_cache_errors_total", "op" => op).increment(1);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::service::{CacheError, MockCacheService};
    use crate::infrastructure::cache::MemoryCache;
    use async_trait::async_trait;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn settings() -> CacheSettings {
        CacheSettings {
            key_prefix: "test".to_string(),
            ttl: Duration::from_secs(60),
            op_timeout: Duration::from_millis(50),
            sweep_timeout: Duration::from_millis(50),
        }
    }

    fn failing_store() -> MockCacheService {
        let mut store = MockCacheService::new();
        store
            .expect_get()
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        store
            .expect_set()
            .returning(|_, _, _| Err(CacheError::ConnectionError("down".to_string())));
        store
            .expect_delete()
            .returning(|_| Err(CacheError::OperationError("down".to_string())));
        store
            .expect_delete_by_prefix()
            .returning(|_| Err(CacheError::OperationError("down".to_string())));
        store
    }

    /// Backend that never answers within the adapter's timeout.
    struct StalledCache;

    #[async_trait]
    impl CacheService for StalledCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Some("{\"name\":\"late\",\"count\":1}".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }

        async fn delete(&self, _key: &str) -> CacheResult<bool> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(true)
        }

        async fn delete_by_prefix(&self, _prefix: &str) -> CacheResult<u64> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(0)
        }

        async fn health_check(&self) -> bool {
            tokio::time::sleep(Duration::from_secs(5)).await;
            true
        }
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = FavoritesCache::new(Arc::new(MemoryCache::new()), settings());
        let value = Sample {
            name: "case".to_string(),
            count: 3,
        };

        cache.set("k", &value, cache.ttl()).await;

        assert_eq!(cache.get::<Sample>("k").await, Some(value));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let cache = FavoritesCache::new(Arc::new(MemoryCache::new()), settings());

        assert_eq!(cache.get::<Sample>("nothing").await, None);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let store = Arc::new(MemoryCache::new());
        store
            .set("k", "not json", Duration::from_secs(60))
            .await
            .unwrap();
        let cache = FavoritesCache::new(store, settings());

        assert_eq!(cache.get::<Sample>("k").await, None);
    }

    #[tokio::test]
    async fn test_backend_errors_are_absorbed() {
        let cache = FavoritesCache::new(Arc::new(failing_store()), settings());

        assert_eq!(cache.get::<Sample>("k").await, None);
        cache.set("k", &true, cache.ttl()).await;
        cache.delete("k").await;
        assert_eq!(cache.delete_by_prefix("test:").await, None);
    }

    #[tokio::test]
    async fn test_timeouts_are_absorbed() {
        let cache = FavoritesCache::new(Arc::new(StalledCache), settings());
        let started = std::time::Instant::now();

        assert_eq!(cache.get::<Sample>("k").await, None);
        cache.set("k", &true, cache.ttl()).await;
        cache.delete("k").await;
        assert_eq!(cache.delete_by_prefix("test:").await, None);
        assert!(!cache.health_check().await);

        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = FavoritesCache::new(Arc::new(MemoryCache::new()), settings());

        cache.set("k", &1u32, cache.ttl()).await;
        cache.delete("k").await;
        cache.delete("k").await;

        assert_eq!(cache.get::<u32>("k").await, None);
    }

    #[tokio::test]
    async fn test_delete_by_prefix_scopes_to_user() {
        let cache = FavoritesCache::new(Arc::new(MemoryCache::new()), settings());
        let keys = cache.keys().clone();

        cache.set(&keys.user_favorites("u1"), &1u32, cache.ttl()).await;
        cache.set(&keys.favorite_exists("u1", "p1"), &true, cache.ttl()).await;
        cache.set(&keys.user_favorites("u2"), &2u32, cache.ttl()).await;

        assert_eq!(cache.delete_by_prefix(&keys.user_scope("u1")).await, Some(2));

        assert_eq!(cache.get::<u32>(&keys.user_favorites("u1")).await, None);
        assert_eq!(cache.get::<bool>(&keys.favorite_exists("u1", "p1")).await, None);
        assert_eq!(cache.get::<u32>(&keys.user_favorites("u2")).await, Some(2));
    }

    /// Backend whose prefix sweep takes longer than a single round-trip.
    struct SlowSweep(MemoryCache);

    #[async_trait]
    impl CacheService for SlowSweep {
        async fn get(&self, key: &str) -> CacheResult<Option<String>> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
            self.0.set(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> CacheResult<bool> {
            self.0.delete(key).await
        }

        async fn delete_by_prefix(&self, prefix: &str) -> CacheResult<u64> {
            tokio::time::sleep(Duration::from_millis(150)).await;
            self.0.delete_by_prefix(prefix).await
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_sweep_uses_its_own_timeout() {
        let settings = CacheSettings {
            sweep_timeout: Duration::from_secs(1),
            ..settings()
        };
        let cache = FavoritesCache::new(Arc::new(SlowSweep(MemoryCache::new())), settings);
        let keys = cache.keys().clone();

        cache.set(&keys.favorite_exists("u1", "p1"), &true, cache.ttl()).await;

        // 150ms sweep outlives the 50ms op timeout but not the sweep timeout
        assert_eq!(cache.delete_by_prefix(&keys.user_scope("u1")).await, Some(1));
        assert_eq!(cache.get::<bool>(&keys.favorite_exists("u1", "p1")).await, None);
    }
}
