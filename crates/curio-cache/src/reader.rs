//! Cache-aside read path for items.
//!
//! Reads go to the cache first and fall back to the store on a miss. A
//! fetched item is written back to the cache before the call returns, so a
//! subsequent read of the same id is served without touching the store.
//! Cache failures are never fatal: the reader logs them and serves from the
//! store instead.

use std::time::Duration;

use curio_storage::{DynItemStore, Item, StoreError};
use tracing::{debug, warn};

use crate::DynItemCache;

fn cache_key(id: &str) -> String {
    format!("item:{id}")
}

/// Read-through view over an [`ItemStore`](curio_storage::ItemStore) and an
/// [`ItemCache`](crate::ItemCache).
#[derive(Clone)]
pub struct CacheAsideReader {
    store: DynItemStore,
    cache: DynItemCache,
    ttl: Option<Duration>,
}

impl CacheAsideReader {
    /// Creates a reader. `ttl` of `None` caches entries without expiry.
    #[must_use]
    pub fn new(store: DynItemStore, cache: DynItemCache, ttl: Option<Duration>) -> Self {
        Self { store, cache, ttl }
    }

    /// Fetches a single item by id, consulting the cache first.
    ///
    /// Misses and absent ids both reach the store; only ids that exist are
    /// cached, so an absent id is re-checked against the store every time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id does not exist, or
    /// `StoreError::Unavailable` if the store itself fails. Cache errors are
    /// logged and absorbed.
    pub async fn get_by_id(&self, id: &str) -> Result<Item, StoreError> {
        let key = cache_key(id);

        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Item>(&bytes) {
                Ok(item) => {
                    debug!(id, "cache hit");
                    return Ok(item);
                }
                Err(e) => {
                    warn!(id, error = %e, "corrupt cache entry, invalidating");
                    if let Err(e) = self.cache.invalidate(&key).await {
                        warn!(id, error = %e, "failed to invalidate cache entry");
                    }
                }
            },
            Ok(None) => debug!(id, "cache miss"),
            Err(e) => warn!(id, error = %e, "cache read failed, falling back to store"),
        }

        let item = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(id))?;

        match serde_json::to_vec(&item) {
            Ok(bytes) => {
                if let Err(e) = self.cache.set(&key, bytes, self.ttl).await {
                    warn!(id, error = %e, "cache write failed");
                }
            }
            Err(e) => warn!(id, error = %e, "failed to serialize item for cache"),
        }

        Ok(item)
    }

    /// Lists every item straight from the store.
    ///
    /// Collection reads are not cached; keeping a list entry coherent with
    /// per-item writes costs more than the store round trip.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store fails.
    pub async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        self.store.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use curio_storage::ItemStore;
    use tokio::task::JoinSet;

    use super::*;
    use crate::error::CacheError;
    use crate::memory::MemoryItemCache;
    use crate::traits::ItemCache;

    struct MockItemStore {
        items: Vec<Item>,
        find_calls: AtomicUsize,
        list_calls: AtomicUsize,
    }

    impl MockItemStore {
        fn with_items(items: Vec<Item>) -> Arc<Self> {
            Arc::new(Self {
                items,
                find_calls: AtomicUsize::new(0),
                list_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ItemStore for MockItemStore {
        async fn find_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.items.iter().find(|i| i.id == id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.items.clone())
        }
    }

    /// Cache whose every operation fails, for degraded-mode tests.
    struct FailingCache;

    #[async_trait]
    impl ItemCache for FailingCache {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::unavailable("cache offline"))
        }

        async fn set(
            &self,
            _key: &str,
            _value: Vec<u8>,
            _ttl: Option<Duration>,
        ) -> Result<(), CacheError> {
            Err(CacheError::unavailable("cache offline"))
        }

        async fn invalidate(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::unavailable("cache offline"))
        }
    }

    /// Counts cache traffic so tests can assert a path never touches it.
    struct CountingCache {
        inner: MemoryItemCache,
        get_calls: AtomicUsize,
        set_calls: AtomicUsize,
    }

    impl CountingCache {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                inner: MemoryItemCache::new(),
                get_calls: AtomicUsize::new(0),
                set_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ItemCache for CountingCache {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key).await
        }

        async fn set(
            &self,
            key: &str,
            value: Vec<u8>,
            ttl: Option<Duration>,
        ) -> Result<(), CacheError> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value, ttl).await
        }

        async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
            self.inner.invalidate(key).await
        }
    }

    fn create_test_item(id: &str, title: &str) -> Item {
        Item::builder(title).id(id).category("books").build()
    }

    #[tokio::test]
    async fn test_miss_populates_cache_before_return() {
        let store = MockItemStore::with_items(vec![create_test_item("i1", "Atlas")]);
        let cache = Arc::new(MemoryItemCache::new());
        let reader = CacheAsideReader::new(store, cache.clone(), None);

        let item = reader.get_by_id("i1").await.unwrap();
        assert_eq!(item.title, "Atlas");

        // The entry must already be visible to a direct cache read.
        let bytes = cache.get(&cache_key("i1")).await.unwrap().unwrap();
        let cached: Item = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(cached, item);
    }

    #[tokio::test]
    async fn test_hit_skips_store() {
        let store = MockItemStore::with_items(vec![create_test_item("i1", "Atlas")]);
        let cache = Arc::new(MemoryItemCache::new());
        let reader = CacheAsideReader::new(store.clone(), cache, None);

        let first = reader.get_by_id("i1").await.unwrap();
        let second = reader.get_by_id("i1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.find_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_absent_id_is_not_cached() {
        let store = MockItemStore::with_items(vec![]);
        let cache = Arc::new(MemoryItemCache::new());
        let reader = CacheAsideReader::new(store.clone(), cache.clone(), None);

        let err = reader.get_by_id("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(cache.get(&cache_key("ghost")).await.unwrap().is_none());

        // No negative entry means the store is asked again.
        let err = reader.get_by_id("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.find_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cache_failure_falls_back_to_store() {
        let store = MockItemStore::with_items(vec![create_test_item("i1", "Atlas")]);
        let reader = CacheAsideReader::new(store.clone(), Arc::new(FailingCache), None);

        let item = reader.get_by_id("i1").await.unwrap();
        assert_eq!(item.id, "i1");

        // Every read reaches the store while the cache is down.
        reader.get_by_id("i1").await.unwrap();
        assert_eq!(store.find_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_list_all_bypasses_cache() {
        let store = MockItemStore::with_items(vec![
            create_test_item("i1", "Atlas"),
            create_test_item("i2", "Borges"),
        ]);
        let cache = CountingCache::new();
        let reader = CacheAsideReader::new(store.clone(), cache.clone(), None);

        let items = reader.list_all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.set_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_corrupt_entry_falls_through_to_store() {
        let store = MockItemStore::with_items(vec![create_test_item("i1", "Atlas")]);
        let cache = Arc::new(MemoryItemCache::new());
        let reader = CacheAsideReader::new(store.clone(), cache.clone(), None);

        cache
            .set(&cache_key("i1"), b"not json".to_vec(), None)
            .await
            .unwrap();

        let item = reader.get_by_id("i1").await.unwrap();
        assert_eq!(item.title, "Atlas");
        assert_eq!(store.find_calls.load(Ordering::SeqCst), 1);

        // The corrupt entry was replaced with a valid one.
        let bytes = cache.get(&cache_key("i1")).await.unwrap().unwrap();
        let cached: Item = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(cached, item);
    }

    #[tokio::test]
    async fn test_entry_expires_and_is_refetched() {
        let store = MockItemStore::with_items(vec![create_test_item("i1", "Atlas")]);
        let cache = Arc::new(MemoryItemCache::new());
        let reader =
            CacheAsideReader::new(store.clone(), cache, Some(Duration::from_millis(40)));

        reader.get_by_id("i1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        reader.get_by_id("i1").await.unwrap();

        assert_eq!(store.find_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_are_benign() {
        let store = MockItemStore::with_items(vec![create_test_item("i1", "Atlas")]);
        let cache = Arc::new(MemoryItemCache::new());
        let reader = CacheAsideReader::new(store.clone(), cache, None);

        let mut set = JoinSet::new();
        for _ in 0..10 {
            let reader = reader.clone();
            set.spawn(async move { reader.get_by_id("i1").await });
        }

        while let Some(result) = set.join_next().await {
            let item = result.unwrap().unwrap();
            assert_eq!(item.id, "i1");
        }

        // Racing misses may each hit the store, but never more than once per
        // caller, and the cache ends up populated.
        let calls = store.find_calls.load(Ordering::SeqCst);
        assert!((1..=10).contains(&calls));
    }
}
