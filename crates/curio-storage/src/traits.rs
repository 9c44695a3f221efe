//! Storage traits for the catalog storage abstraction layer.
//!
//! This module defines the trait that all item store backends must implement.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::item::Item;

/// Read access to the catalog's system of record.
///
/// Implementations must be thread-safe (`Send + Sync`); a single handle is
/// shared by all concurrent requests.
///
/// # Example
///
/// ```ignore
/// use curio_storage::{ItemStore, StoreError, Item};
///
/// async fn get_item(store: &dyn ItemStore, id: &str) -> Result<Item, StoreError> {
///     store
///         .find_by_id(id)
///         .await?
///         .ok_or_else(|| StoreError::not_found(id))
/// }
/// ```
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Finds an item by its ID.
    ///
    /// Returns `None` if the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing items.
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, StoreError>;

    /// Returns all items in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list_all(&self) -> Result<Vec<Item>, StoreError>;
}
