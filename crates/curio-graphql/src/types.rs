//! GraphQL object types.
//!
//! Thin views over the core models. `Account` deliberately omits the
//! password hash; the hash never crosses the schema boundary.

use async_graphql::{ID, SimpleObject};
use curio_auth::Identity;
use curio_storage::Item;

/// The account behind an authenticated request.
#[derive(Debug, Clone, SimpleObject)]
pub struct Account {
    /// Stable identity id.
    pub id: ID,
    /// Display name chosen at sign-up.
    pub username: String,
    /// Email address.
    pub email: String,
}

impl From<Identity> for Account {
    fn from(identity: Identity) -> Self {
        Self {
            id: ID(identity.id),
            username: identity.username,
            email: identity.email,
        }
    }
}

/// A catalog item as exposed by the API.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Item")]
pub struct CatalogItem {
    /// Stable item id.
    pub id: ID,
    /// Display title.
    pub title: String,
    /// Category the item is filed under.
    pub category: String,
}

impl From<Item> for CatalogItem {
    fn from(item: Item) -> Self {
        Self {
            id: ID(item.id),
            title: item.title,
            category: item.category,
        }
    }
}
