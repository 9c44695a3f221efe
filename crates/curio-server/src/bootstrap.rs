//! Bootstrap module for seeding initial catalog data.
//!
//! Seed items come from the `[bootstrap]` configuration section and are
//! inserted only into an empty store, so restarts with persistent backends
//! stay idempotent.

use curio_db_memory::InMemoryItemStore;
use curio_storage::Item;
use tracing::info;

use crate::config::BootstrapConfig;

/// Inserts the configured seed items into an empty store.
///
/// Returns the number of items inserted; a non-empty store is left
/// untouched.
pub fn seed_items(store: &InMemoryItemStore, config: &BootstrapConfig) -> usize {
    if config.items.is_empty() {
        return 0;
    }

    if !store.is_empty() {
        info!("store already holds items, skipping bootstrap seed");
        return 0;
    }

    let mut seeded = 0;
    for seed in &config.items {
        let mut builder = Item::builder(&seed.title);
        if let Some(ref id) = seed.id {
            builder = builder.id(id);
        }
        let stored = store.insert(builder.category(&seed.category).build());
        info!(id = %stored.id, title = %stored.title, "seeded catalog item");
        seeded += 1;
    }

    info!(count = seeded, "bootstrap seed completed");
    seeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ItemSeed;

    fn create_test_config() -> BootstrapConfig {
        BootstrapConfig {
            items: vec![
                ItemSeed {
                    id: Some("item-1".to_string()),
                    title: "Astrolabe".to_string(),
                    category: "instruments".to_string(),
                },
                ItemSeed {
                    id: None,
                    title: "Orrery".to_string(),
                    category: "models".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_seeds_empty_store() {
        use curio_storage::ItemStore;

        let store = InMemoryItemStore::new();
        let seeded = seed_items(&store, &create_test_config());

        assert_eq!(seeded, 2);
        assert_eq!(store.count(), 2);
        let found = store.find_by_id("item-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Astrolabe");
    }

    #[test]
    fn test_assigns_ids_to_seeds_without_one() {
        let store = InMemoryItemStore::new();
        seed_items(&store, &create_test_config());
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_skips_non_empty_store() {
        let store = InMemoryItemStore::new();
        store.insert(Item::new("Sextant", "instruments"));

        let seeded = seed_items(&store, &create_test_config());
        assert_eq!(seeded, 0);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_empty_seed_list_is_noop() {
        let store = InMemoryItemStore::new();
        assert_eq!(seed_items(&store, &BootstrapConfig::default()), 0);
        assert!(store.is_empty());
    }
}
