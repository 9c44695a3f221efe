//! Signed bearer token issuance and verification.
//!
//! Tokens are standard three-segment signed strings
//! (`header.claims.signature`) carrying a minimal identity claim. They are
//! stateless: nothing is persisted at issuance, and verification
//! reconstructs the claims from the token alone. Signing uses a symmetric
//! secret held in process-wide configuration, loaded once at startup.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AuthError;

/// The verified identity carried by a token.
///
/// This is what a passing token proves; it is attached to the request
/// context without a credential-store round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    /// Stable identity id (the token's subject).
    pub id: String,
    /// Email recorded at issuance.
    pub email: String,
}

impl TokenIdentity {
    /// Creates a new token identity.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

impl From<Claims> for TokenIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity id).
    pub sub: String,

    /// Email of the subject.
    pub email: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Builds claims expiring `ttl` from now.
    #[must_use]
    pub fn new(subject: &TokenIdentity, ttl: Duration) -> Self {
        Self::with_issued_at(subject, OffsetDateTime::now_utc().unix_timestamp(), ttl)
    }

    /// Builds claims with an explicit issuance timestamp.
    #[must_use]
    pub fn with_issued_at(subject: &TokenIdentity, iat: i64, ttl: Duration) -> Self {
        let exp = iat.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
        Self {
            sub: subject.id.clone(),
            email: subject.email.clone(),
            iat,
            exp,
        }
    }
}

/// Issues and verifies HS256-signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Creates a service around a symmetric signing secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if signing fails.
    pub fn issue(&self, subject: &TokenIdentity, ttl: Duration) -> Result<String, AuthError> {
        self.encode(&Claims::new(subject, ttl))
    }

    /// Encodes prepared claims into a signed token string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if signing fails.
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(e.to_string()))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// A token signed with a different secret is rejected outright; there is
    /// no partial trust in unverified claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSignature`, `AuthError::Expired` or
    /// `AuthError::Malformed` depending on which check failed.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // A token is expired the moment now > exp; no clock-skew leeway.
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Verifies a token on the blocking pool.
    ///
    /// # Errors
    ///
    /// Same as [`verify`](Self::verify), plus `AuthError::Internal` if the
    /// blocking task fails to run.
    pub async fn verify_async(&self, token: String) -> Result<Claims, AuthError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.verify(&token))
            .await
            .map_err(|e| AuthError::internal(e.to_string()))?
    }
}
