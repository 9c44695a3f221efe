use async_trait::async_trait;
use curio_storage::{Item, ItemStore, StoreError};
use papaya::HashMap as PapayaHashMap;

/// In-memory item store using a papaya lock-free HashMap.
///
/// This backend provides:
/// - Lock-free concurrent access via papaya::HashMap
/// - Point lookup and full listing
/// - An insert surface for bootstrap seeding and tests
///
/// It is the system of record in single-process deployments; cached copies
/// held elsewhere are derived replicas.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    data: PapayaHashMap<String, Item>,
}

impl InMemoryItemStore {
    /// Creates a new, empty in-memory item store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: PapayaHashMap::new(),
        }
    }

    /// Inserts an item, replacing any existing item with the same ID.
    ///
    /// An item with an empty ID gets a generated UUID. Returns the item as
    /// stored.
    pub fn insert(&self, mut item: Item) -> Item {
        if item.id.is_empty() {
            item.id = uuid::Uuid::new_v4().to_string();
        }
        let guard = self.data.pin();
        guard.insert(item.id.clone(), item.clone());
        item
    }

    /// Returns the number of items in the store.
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.pin().len()
    }

    /// Returns `true` if the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
        let guard = self.data.pin();
        Ok(guard.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        let guard = self.data.pin();
        let mut items: Vec<Item> = guard.values().cloned().collect();
        // Map iteration order is arbitrary; sort for stable listings.
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(id: &str, title: &str) -> Item {
        Item::builder(title).id(id).category("instruments").build()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryItemStore::new();
        store.insert(create_test_item("item-1", "Astrolabe"));

        let found = store.find_by_id("item-1").await.unwrap();
        assert_eq!(found.unwrap().title, "Astrolabe");

        let missing = store.find_by_id("nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_assigns_id_when_empty() {
        let store = InMemoryItemStore::new();
        let stored = store.insert(Item {
            id: String::new(),
            title: "Sextant".to_string(),
            category: "instruments".to_string(),
        });

        assert!(!stored.id.is_empty());
        let found = store.find_by_id(&stored.id).await.unwrap();
        assert_eq!(found.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_insert_replaces_same_id() {
        let store = InMemoryItemStore::new();
        store.insert(create_test_item("item-1", "Astrolabe"));
        store.insert(create_test_item("item-1", "Orrery"));

        assert_eq!(store.count(), 1);
        let found = store.find_by_id("item-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Orrery");
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_title() {
        let store = InMemoryItemStore::new();
        store.insert(create_test_item("item-2", "Orrery"));
        store.insert(create_test_item("item-1", "Astrolabe"));
        store.insert(create_test_item("item-3", "Sextant"));

        let items = store.list_all().await.unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Astrolabe", "Orrery", "Sextant"]);
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let store = InMemoryItemStore::new();
        assert!(store.is_empty());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_reads() {
        use std::sync::Arc;
        use tokio::task::JoinSet;

        let store = Arc::new(InMemoryItemStore::new());
        for i in 0..10 {
            store.insert(create_test_item(&format!("item-{i}"), &format!("Item {i}")));
        }

        let mut join_set = JoinSet::new();
        for i in 0..50 {
            let store_clone = Arc::clone(&store);
            join_set.spawn(async move {
                let target_id = format!("item-{}", i % 10);
                store_clone.find_by_id(&target_id).await.unwrap().is_some()
            });
        }

        let mut success_count = 0;
        while let Some(result) = join_set.join_next().await {
            if result.unwrap() {
                success_count += 1;
            }
        }

        assert_eq!(success_count, 50);
        assert_eq!(store.count(), 10);
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        use std::sync::Arc;
        use tokio::task::JoinSet;

        let store = Arc::new(InMemoryItemStore::new());
        let mut join_set = JoinSet::new();

        for i in 0..20 {
            let store_clone = Arc::clone(&store);
            join_set.spawn(async move {
                store_clone.insert(create_test_item(&format!("item-{i}"), &format!("Item {i}")));
            });
        }

        while join_set.join_next().await.is_some() {}
        assert_eq!(store.count(), 20);
    }

    #[tokio::test]
    async fn test_trait_object_usage() {
        let store: curio_storage::DynItemStore = std::sync::Arc::new({
            let s = InMemoryItemStore::new();
            s.insert(create_test_item("item-1", "Astrolabe"));
            s
        });

        let found = store.find_by_id("item-1").await.unwrap();
        assert!(found.is_some());
    }
}
