//! Identity records and the credential store contract.

use async_trait::async_trait;

use crate::CredentialResult;

/// A stored user identity.
///
/// Created by sign-up and never mutated afterwards. The password is held
/// only as an Argon2 hash; the plaintext never reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable opaque identifier.
    pub id: String,

    /// Display name chosen at sign-up.
    pub username: String,

    /// Email address, unique across all identities.
    pub email: String,

    /// PHC-formatted Argon2 password hash.
    pub password_hash: String,
}

impl Identity {
    /// Creates an identity with a generated id.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Storage contract for identity records.
///
/// `find_*` return `Ok(None)` for an absent record; `Err` is reserved for
/// store failures. `create` enforces email uniqueness.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Finds an identity by its id.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Unavailable` if the store cannot be reached.
    async fn find_by_id(&self, id: &str) -> CredentialResult<Option<Identity>>;

    /// Finds an identity by its unique email.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Unavailable` if the store cannot be reached.
    async fn find_by_email(&self, email: &str) -> CredentialResult<Option<Identity>>;

    /// Persists a new identity.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::DuplicateEmail` if an identity with the
    /// same email already exists, or `CredentialError::Unavailable` if the
    /// store cannot be reached.
    async fn create(&self, identity: &Identity) -> CredentialResult<()>;
}
