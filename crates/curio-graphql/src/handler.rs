//! Axum HTTP handlers for the GraphQL endpoint.
//!
//! `POST /graphql` executes queries and mutations; `GET /graphql` serves the
//! playground. Authentication runs in optional mode: an anonymous request
//! proceeds with no identity in context, while a presented-but-invalid token
//! is rejected by the extractor before the schema executes.

use std::sync::Arc;

use async_graphql::ServerError;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{FromRef, State};
use axum::response::{Html, IntoResponse};
use curio_auth::middleware::{AuthState, OptionalBearerAuth};
use curio_auth::{DynCredentialStore, SessionService};
use curio_cache::CacheAsideReader;
use tracing::{debug, error};

use crate::context::RequestContext;
use crate::schema::CatalogSchema;

/// State shared across GraphQL handlers.
///
/// Holds the static schema plus the shared handles cloned into each
/// request's [`RequestContext`].
#[derive(Clone)]
pub struct GraphQLState {
    /// The executable schema, built once at startup.
    pub schema: CatalogSchema,

    /// Token verification state for the bearer extractors.
    pub auth: AuthState,

    /// Cache-accelerated item reads.
    pub items: CacheAsideReader,

    /// Sign-up and login flows.
    pub sessions: Arc<SessionService>,

    /// Identity records.
    pub credentials: DynCredentialStore,
}

impl FromRef<GraphQLState> for AuthState {
    fn from_ref(state: &GraphQLState) -> Self {
        state.auth.clone()
    }
}

/// Handles `POST /graphql`.
///
/// Builds a fresh [`RequestContext`] from the gate's output and the shared
/// handles, attaches it to the request, and executes it against the schema.
pub async fn graphql_handler(
    State(state): State<GraphQLState>,
    OptionalBearerAuth(identity): OptionalBearerAuth,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request_id = uuid::Uuid::new_v4().to_string();
    debug!(
        request_id = %request_id,
        authenticated = identity.is_some(),
        "executing graphql request"
    );

    let context = match RequestContext::builder()
        .with_identity(identity)
        .with_items(state.items.clone())
        .with_sessions(state.sessions.clone())
        .with_credentials(state.credentials.clone())
        .with_request_id(&request_id)
        .build()
    {
        Ok(context) => context,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "request context construction failed");
            return async_graphql::Response::from_errors(vec![ServerError::new(
                "Internal server error",
                None,
            )])
            .into();
        }
    };

    state
        .schema
        .execute(request.into_inner().data(context))
        .await
        .into()
}

/// Handles `GET /graphql`: the interactive playground.
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
