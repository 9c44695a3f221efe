//! Catalog item model.
//!
//! Items are the records served by the query API. The store is the system
//! of record; any cached copy is a derived replica keyed by the same id.

use serde::{Deserialize, Serialize};

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable, opaque identifier.
    #[serde(default)]
    pub id: String,

    /// Display title.
    pub title: String,

    /// Category the item is filed under.
    pub category: String,
}

impl Item {
    /// Creates a new item with a generated UUID as the ID.
    #[must_use]
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            category: category.into(),
        }
    }

    /// Creates a new item builder.
    #[must_use]
    pub fn builder(title: impl Into<String>) -> ItemBuilder {
        ItemBuilder::new(title)
    }
}

/// Builder for creating `Item` instances.
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            item: Item::new(title, ""),
        }
    }

    /// Sets the item ID, replacing the generated one.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.item.id = id.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.item.category = category.into();
        self
    }

    /// Builds the item.
    #[must_use]
    pub fn build(self) -> Item {
        self.item
    }
}
