//! GraphQL execution context.
//!
//! This module provides the context struct that holds all dependencies needed
//! by GraphQL resolvers. The context is constructed per-request and contains
//! both shared handles (reader, services) and request-specific state (the
//! authenticated identity, the request id).
//!
//! # Example
//!
//! ```ignore
//! use curio_graphql::RequestContextBuilder;
//!
//! let context = RequestContextBuilder::new()
//!     .with_items(reader.clone())
//!     .with_sessions(sessions.clone())
//!     .with_credentials(credentials.clone())
//!     .with_identity(identity)
//!     .with_request_id("req-123")
//!     .build()?;
//! ```

use std::sync::Arc;

use curio_auth::{DynCredentialStore, SessionService, TokenIdentity};
use curio_cache::CacheAsideReader;

/// Per-request execution context for GraphQL resolvers.
///
/// Built once per request by the HTTP handler from the gate's output plus
/// the shared service handles, passed into `Schema::execute` as request
/// data, and discarded at request end. Never shared across requests.
#[derive(Clone)]
pub struct RequestContext {
    /// The verified identity behind the presented bearer token, if any.
    pub identity: Option<TokenIdentity>,

    /// Cache-accelerated item reads.
    pub items: CacheAsideReader,

    /// Sign-up and login flows.
    pub sessions: Arc<SessionService>,

    /// Identity records, for consumers that need a fresh record rather than
    /// the token's claims.
    pub credentials: DynCredentialStore,

    /// Request id for tracing and correlation.
    pub request_id: String,
}

impl RequestContext {
    /// Returns whether the request carries a verified identity.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the authenticated subject id, if any.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.id.as_str())
    }

    /// Creates a new builder for RequestContext.
    #[must_use]
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }
}

/// Builder for constructing a [`RequestContext`].
///
/// The builder validates that all required handles are provided before
/// creating the context.
#[derive(Default)]
pub struct RequestContextBuilder {
    identity: Option<TokenIdentity>,
    items: Option<CacheAsideReader>,
    sessions: Option<Arc<SessionService>>,
    credentials: Option<DynCredentialStore>,
    request_id: Option<String>,
}

impl RequestContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the authenticated identity (or `None` for anonymous requests).
    #[must_use]
    pub fn with_identity(mut self, identity: Option<TokenIdentity>) -> Self {
        self.identity = identity;
        self
    }

    /// Sets the item reader.
    #[must_use]
    pub fn with_items(mut self, items: CacheAsideReader) -> Self {
        self.items = Some(items);
        self
    }

    /// Sets the session service.
    #[must_use]
    pub fn with_sessions(mut self, sessions: Arc<SessionService>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Sets the credential store.
    #[must_use]
    pub fn with_credentials(mut self, credentials: DynCredentialStore) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the request id.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Builds the RequestContext.
    ///
    /// # Errors
    ///
    /// Returns an error if a required handle is missing.
    pub fn build(self) -> Result<RequestContext, ContextBuildError> {
        let items = self
            .items
            .ok_or(ContextBuildError::MissingField("items"))?;

        let sessions = self
            .sessions
            .ok_or(ContextBuildError::MissingField("sessions"))?;

        let credentials = self
            .credentials
            .ok_or(ContextBuildError::MissingField("credentials"))?;

        let request_id = self
            .request_id
            .ok_or(ContextBuildError::MissingField("request_id"))?;

        Ok(RequestContext {
            identity: self.identity,
            items,
            sessions,
            credentials,
            request_id,
        })
    }
}

/// Errors that can occur when building a RequestContext.
#[derive(Debug, thiserror::Error)]
pub enum ContextBuildError {
    /// A required field was not provided.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use curio_auth::{AuthConfig, InMemoryCredentialStore, PasswordHasher, TokenService};
    use curio_auth::config::PasswordConfig;
    use curio_cache::MemoryItemCache;
    use curio_db_memory::InMemoryItemStore;

    use super::*;

    fn create_test_parts() -> (CacheAsideReader, Arc<SessionService>, DynCredentialStore) {
        let store = Arc::new(InMemoryItemStore::new());
        let cache = Arc::new(MemoryItemCache::new());
        let reader = CacheAsideReader::new(store, cache, None);

        let credentials: DynCredentialStore = Arc::new(InMemoryCredentialStore::new());
        let config = AuthConfig {
            secret: "unit-test-secret-0123456789".to_string(),
            ..AuthConfig::default()
        };
        let hasher = Arc::new(
            PasswordHasher::new(&PasswordConfig {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );
        let tokens = Arc::new(TokenService::new(&config.secret));
        let sessions = Arc::new(SessionService::new(
            credentials.clone(),
            hasher,
            tokens,
            &config,
        ));

        (reader, sessions, credentials)
    }

    #[test]
    fn test_builder_missing_items() {
        let result = RequestContextBuilder::new()
            .with_request_id("req-123")
            .build();

        assert!(matches!(
            result,
            Err(ContextBuildError::MissingField("items"))
        ));
    }

    #[test]
    fn test_builder_missing_request_id() {
        let (reader, sessions, credentials) = create_test_parts();
        let result = RequestContextBuilder::new()
            .with_items(reader)
            .with_sessions(sessions)
            .with_credentials(credentials)
            .build();

        assert!(matches!(
            result,
            Err(ContextBuildError::MissingField("request_id"))
        ));
    }

    #[test]
    fn test_builder_complete_defaults_to_anonymous() {
        let (reader, sessions, credentials) = create_test_parts();
        let context = RequestContextBuilder::new()
            .with_items(reader)
            .with_sessions(sessions)
            .with_credentials(credentials)
            .with_request_id("req-123")
            .build()
            .unwrap();

        assert!(!context.is_authenticated());
        assert!(context.subject_id().is_none());
        assert_eq!(context.request_id, "req-123");
    }

    #[test]
    fn test_builder_carries_identity() {
        let (reader, sessions, credentials) = create_test_parts();
        let context = RequestContextBuilder::new()
            .with_items(reader)
            .with_sessions(sessions)
            .with_credentials(credentials)
            .with_identity(Some(TokenIdentity::new("user-1", "alice@example.com")))
            .with_request_id("req-123")
            .build()
            .unwrap();

        assert!(context.is_authenticated());
        assert_eq!(context.subject_id(), Some("user-1"));
    }
}
