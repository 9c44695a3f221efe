//! In-memory item store backend for the Curio catalog server.
//!
//! This crate provides an in-memory implementation of the `ItemStore` trait
//! from `curio-storage`, using papaya lock-free HashMap for concurrent access.
//!
//! # Example
//!
//! ```ignore
//! use curio_db_memory::InMemoryItemStore;
//! use curio_storage::{Item, ItemStore};
//!
//! let store = InMemoryItemStore::new();
//! let stored = store.insert(Item::new("Astrolabe", "instruments"));
//!
//! let found = store.find_by_id(&stored.id).await?;
//! ```

pub mod storage;

pub use storage::InMemoryItemStore;

// Re-export the ItemStore trait for convenience
pub use curio_storage::{Item, ItemStore, StoreError};
