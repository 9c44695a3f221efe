//! Axum extractors for bearer-token authentication.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use curio_auth::middleware::{AuthState, BearerAuth};
//!
//! async fn protected_handler(BearerAuth(identity): BearerAuth) -> String {
//!     format!("Hello, {}!", identity.email)
//! }
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .with_state(auth_state);
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::token::{TokenIdentity, TokenService};

use super::gate::{AuthGate, GateMode};

/// State required for bearer token authentication.
///
/// Include this in your application state and expose it to the extractors
/// via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Token service used to verify presented tokens.
    pub tokens: Arc<TokenService>,
}

impl AuthState {
    /// Creates a new auth state.
    #[must_use]
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}

/// Extractor that requires a valid bearer token.
///
/// # Errors
///
/// Rejects with `AuthError` (which implements `IntoResponse`) if the token
/// is missing or fails verification.
#[derive(Debug)]
pub struct BearerAuth(pub TokenIdentity);

impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let gate = AuthGate::new(auth_state.tokens.clone(), GateMode::Required);

        match gate.authenticate(authorization_header(parts)).await? {
            Some(identity) => Ok(Self(identity)),
            None => Err(AuthError::Missing),
        }
    }
}

/// Extractor that accepts but does not require a bearer token.
///
/// Yields `None` when no token is presented. A presented token that fails
/// verification still rejects the request.
#[derive(Debug)]
pub struct OptionalBearerAuth(pub Option<TokenIdentity>);

impl<S> FromRequestParts<S> for OptionalBearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let gate = AuthGate::new(auth_state.tokens.clone(), GateMode::Optional);

        Ok(Self(gate.authenticate(authorization_header(parts)).await?))
    }
}
