//! # curio-storage
//!
//! Storage abstraction layer for the Curio catalog server.
//!
//! This crate defines the item model and the trait that all item store
//! backends must implement. It does not contain any implementations - those
//! are provided by separate crates such as `curio-db-memory`.
//!
//! ## Overview
//!
//! The main trait is [`ItemStore`], which defines the contract for:
//! - Point lookup by ID (`find_by_id`)
//! - Full listing (`list_all`)
//!
//! Absent items are reported as `Ok(None)`; errors are reserved for
//! infrastructure failures.
//!
//! ## Storage Backends
//!
//! To implement a storage backend, implement the [`ItemStore`] trait:
//!
//! ```ignore
//! use async_trait::async_trait;
//! use curio_storage::{Item, ItemStore, StoreError};
//!
//! struct MyStore {
//!     // ...
//! }
//!
//! #[async_trait]
//! impl ItemStore for MyStore {
//!     async fn find_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
//!         // Implementation
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod item;
mod traits;

pub use error::{ErrorCategory, StoreError};
pub use item::{Item, ItemBuilder};
pub use traits::ItemStore;

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Type-erased, shareable item store handle.
pub type DynItemStore = std::sync::Arc<dyn ItemStore>;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{DynItemStore, Item, ItemStore, StoreError, StoreResult};
}
