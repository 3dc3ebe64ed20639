//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled.
/// Every read is a miss, so the service always goes to the store.
///
/// # Use Cases
///
/// - Development environments without Redis
/// - Testing scenarios where caching should be bypassed
/// - Fallback when Redis connection fails at startup
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn delete_by_prefix(&self, _prefix: &str) -> CacheResult<u64> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
