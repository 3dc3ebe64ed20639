//! Raw key-value cache trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// These never leave the cache layer: [`super::FavoritesCache`] logs them and
/// degrades to a miss or a no-op.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
    #[error("Cache serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Untyped string key-value store with per-entry expiry.
///
/// Implementations report failures faithfully; absorbing them is the job of
/// the typed adapter on top.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process TTL map
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the stored value, or `Ok(None)` if the key is absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes a key. Returns whether it existed; a missing key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Removes every key starting with `prefix` and returns how many were removed.
    async fn delete_by_prefix(&self, prefix: &str) -> CacheResult<u64>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
