//! Caching layer for per-user favorite views and existence flags.
//!
//! Provides a raw [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process TTL map
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! and the typed [`FavoritesCache`] adapter the service talks to, which
//! bounds each call with a timeout and absorbs every failure.

mod adapter;
mod keys;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use adapter::{CacheSettings, FavoritesCache};
pub use keys::CacheKeys;
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
