//! In-process cache backend backed by DashMap.
//!
//! Used in single-instance deployments and in tests. Entries with a TTL are
//! expired lazily on read.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::CacheError;
use crate::traits::ItemCache;

/// A cached entry with optional TTL.
#[derive(Clone, Debug)]
struct CachedEntry {
    data: Vec<u8>,
    cached_at: Instant,
    ttl: Option<Duration>,
}

impl CachedEntry {
    fn new(data: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => self.cached_at.elapsed() > ttl,
            None => false,
        }
    }
}

/// In-process item cache.
#[derive(Debug, Default)]
pub struct MemoryItemCache {
    entries: DashMap<String, CachedEntry>,
}

impl MemoryItemCache {
    /// Creates a new, empty in-process cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the number of live entries (expired entries included until
    /// they are read).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ItemCache for MemoryItemCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                // Release the shard lock before removing
                drop(entry);
                self.entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.data.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        self.entries
            .insert(key.to_string(), CachedEntry::new(value, ttl));
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryItemCache::new();
        cache.set("k1", b"hello".to_vec(), None).await.unwrap();

        let value = cache.get("k1").await.unwrap();
        assert_eq!(value.as_deref(), Some(b"hello".as_slice()));
        assert!(cache.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = MemoryItemCache::new();
        cache.set("k1", b"one".to_vec(), None).await.unwrap();
        cache.set("k1", b"two".to_vec(), None).await.unwrap();

        let value = cache.get("k1").await.unwrap();
        assert_eq!(value.as_deref(), Some(b"two".as_slice()));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = MemoryItemCache::new();
        cache.set("k1", b"hello".to_vec(), None).await.unwrap();
        cache.invalidate("k1").await.unwrap();
        assert!(cache.get("k1").await.unwrap().is_none());

        // Removing a missing key is fine
        cache.invalidate("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_entry_without_ttl_does_not_expire() {
        let cache = MemoryItemCache::new();
        cache.set("k1", b"hello".to_vec(), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get("k1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_entry_with_ttl_expires() {
        let cache = MemoryItemCache::new();
        cache
            .set("k1", b"hello".to_vec(), Some(Duration::from_millis(10)))
            .await
            .unwrap();

        assert!(cache.get("k1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get("k1").await.unwrap().is_none());
        // Expired entry is dropped on read
        assert!(cache.is_empty());
    }
}
