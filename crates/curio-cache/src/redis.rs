//! Redis cache backend.
//!
//! Used when the catalog runs as multiple instances that must share one
//! cache. Connections come from a deadpool pool and are created lazily, so
//! constructing the backend succeeds even while Redis is down; individual
//! operations fail with `CacheError::Unavailable` instead.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;

use crate::error::CacheError;
use crate::traits::ItemCache;

/// Redis-backed item cache.
#[derive(Clone)]
pub struct RedisItemCache {
    pool: Pool,
}

impl RedisItemCache {
    /// Creates a cache over an existing connection pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates a cache from a connection URL (e.g. `redis://localhost:6379`).
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Unavailable` if the URL cannot be parsed into a
    /// pool configuration.
    pub fn connect(url: &str, pool_size: usize) -> Result<Self, CacheError> {
        let mut cfg = deadpool_redis::Config::from_url(url);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(pool_size));
        let pool = cfg
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| CacheError::unavailable(e.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ItemCache for RedisItemCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.pool.get().await?;
        let data: Option<Vec<u8>> = conn.get(key).await?;
        Ok(data)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        match ttl {
            // SETEX rejects 0 seconds
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_bad_url() {
        let result = RedisItemCache::connect("definitely not a url", 4);
        assert!(matches!(result, Err(CacheError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_operations_fail_without_server() {
        // Pool creation is lazy; operations against an unreachable address
        // must surface Unavailable rather than hang forever or panic.
        let cache = RedisItemCache::connect("redis://127.0.0.1:1/", 1).unwrap();
        let result = cache.get("k1").await;
        assert!(matches!(result, Err(CacheError::Unavailable { .. })));
    }
}
