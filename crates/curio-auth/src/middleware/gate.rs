//! Bearer-token gate.

use std::sync::Arc;

use tracing::debug;

use crate::error::AuthError;
use crate::token::{TokenIdentity, TokenService};

/// Whether a surface demands a token or merely accepts one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// Requests without a valid token are rejected.
    Required,
    /// Requests without a token proceed anonymously. A presented token must
    /// still verify; invalid tokens are rejected in this mode too.
    Optional,
}

/// Verifies an inbound request's bearer token ahead of request handling.
///
/// On success the verified identity is handed to the caller for placement
/// in the request context. The gate trusts the token's claims without a
/// credential-store round trip; consumers that need a fresh identity record
/// must look it up themselves.
pub struct AuthGate {
    tokens: Arc<TokenService>,
    mode: GateMode,
}

impl AuthGate {
    /// Creates a gate in the given mode.
    #[must_use]
    pub fn new(tokens: Arc<TokenService>, mode: GateMode) -> Self {
        Self { tokens, mode }
    }

    /// Authenticates a raw `Authorization` header value.
    ///
    /// Returns the token's identity, or `Ok(None)` when no bearer token was
    /// presented and the mode allows anonymous access.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Missing` when no token is presented in required
    /// mode, or the verification error for a presented token that fails.
    pub async fn authenticate(
        &self,
        header: Option<&str>,
    ) -> Result<Option<TokenIdentity>, AuthError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => {
                let claims = self.tokens.verify_async(token.to_string()).await?;
                debug!(subject = %claims.sub, "token verified");
                Ok(Some(claims.into()))
            }
            None => match self.mode {
                GateMode::Required => Err(AuthError::Missing),
                GateMode::Optional => Ok(None),
            },
        }
    }
}
