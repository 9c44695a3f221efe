//! Schema roots.
//!
//! The schema is static and built once at startup; per-request state travels
//! in a [`RequestContext`] attached to each executed request. Absent items
//! resolve to null (nullable field, not an error), mirroring the store's
//! distinction between absence and failure.

use async_graphql::{Context, EmptySubscription, ID, Object, Result, Schema};
use tracing::debug;

use crate::context::RequestContext;
use crate::error;
use crate::types::{Account, CatalogItem};

/// The executable schema for the catalog API.
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema. Call once at startup and share the result.
#[must_use]
pub fn build_schema() -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

fn request_context<'a>(ctx: &Context<'a>) -> Result<&'a RequestContext> {
    ctx.data::<RequestContext>()
}

/// Query root.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The account behind the presented bearer token.
    ///
    /// This is the one consumer that wants a fresh record rather than the
    /// token's claims, so it re-fetches the identity from the credential
    /// store by subject id.
    async fn me(&self, ctx: &Context<'_>) -> Result<Account> {
        let request = request_context(ctx)?;
        let Some(identity) = request.identity.as_ref() else {
            return Err(error::unauthenticated());
        };

        let record = request
            .credentials
            .find_by_id(&identity.id)
            .await
            .map_err(|e| error::credential_error(&e))?;

        // A valid token whose identity record is gone is treated the same
        // as no token: the claims alone are not enough for this field.
        record.map(Account::from).ok_or_else(error::unauthenticated)
    }

    /// Fetches a single item by id. Resolves to null if no such item exists.
    async fn item(&self, ctx: &Context<'_>, id: ID) -> Result<Option<CatalogItem>> {
        let request = request_context(ctx)?;

        match request.items.get_by_id(id.as_str()).await {
            Ok(item) => Ok(Some(item.into())),
            Err(e) if e.is_not_found() => {
                debug!(id = %id.as_str(), "item not found");
                Ok(None)
            }
            Err(e) => Err(error::store_error(&e)),
        }
    }

    /// Lists all items, straight from the store.
    async fn items(&self, ctx: &Context<'_>) -> Result<Vec<CatalogItem>> {
        let request = request_context(ctx)?;

        let items = request
            .items
            .list_all()
            .await
            .map_err(|e| error::store_error(&e))?;

        Ok(items.into_iter().map(CatalogItem::from).collect())
    }
}

/// Mutation root.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Registers a new account and returns a bearer token for it.
    async fn sign_up(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<String> {
        let request = request_context(ctx)?;

        request
            .sessions
            .sign_up(&username, &email, &password)
            .await
            .map_err(|e| error::credential_error(&e))
    }

    /// Verifies credentials and returns a fresh bearer token.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<String> {
        let request = request_context(ctx)?;

        request
            .sessions
            .login(&email, &password)
            .await
            .map_err(|e| error::credential_error(&e))
    }
}
