//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Keys fetched per `SCAN` round-trip during prefix deletion.
const SCAN_BATCH: usize = 200;

/// Redis cache implementation.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Errors are returned to the caller, which decides how to degrade.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::OperationError(format!("GET {}: {}", key, e)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.client.clone();
        // SET EX rejects 0; sub-second TTLs round up to one second.
        let ttl_seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(|e| CacheError::OperationError(format!("SET {}: {}", key, e)))
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i64>(key)
            .await
            .map_err(|e| CacheError::OperationError(format!("DEL {}: {}", key, e)))?;

        Ok(deleted > 0)
    }

    async fn delete_by_prefix(&self, prefix: &str) -> CacheResult<u64> {
        let mut conn = self.client.clone();
        let pattern = format!("{}*", escape_glob(prefix));
        let mut cursor: u64 = 0;
        let mut removed: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| CacheError::OperationError(format!("SCAN {}: {}", pattern, e)))?;

            if !keys.is_empty() {
                let deleted = conn
                    .del::<_, u64>(&keys)
                    .await
                    .map_err(|e| CacheError::OperationError(format!("DEL batch: {}", e)))?;
                removed += deleted;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(prefix, removed, "Redis prefix delete finished");
        Ok(removed)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

/// Escapes Redis glob metacharacters so the prefix matches literally.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
