//! Sign-up and login flows.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::error::CredentialError;
use crate::{CredentialResult, DynCredentialStore};
use crate::password::PasswordHasher;
use crate::storage::Identity;
use crate::token::{TokenIdentity, TokenService};

/// Stateless service composing the hasher, the credential store and the
/// token service into the sign-up and login use cases.
///
/// Sign-up tokens are long-lived so a new account stays signed in; login
/// tokens are short-lived. Both TTLs come from [`AuthConfig`].
pub struct SessionService {
    store: DynCredentialStore,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenService>,
    signup_token_ttl: Duration,
    login_token_ttl: Duration,
}

impl SessionService {
    /// Creates a session service.
    #[must_use]
    pub fn new(
        store: DynCredentialStore,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenService>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            signup_token_ttl: config.signup_token_ttl,
            login_token_ttl: config.login_token_ttl,
        }
    }

    /// Registers a new identity and returns a bearer token for it.
    ///
    /// The password is hashed before anything is persisted; the store only
    /// ever sees the hash.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::DuplicateEmail` if the email is already
    /// registered, or other `CredentialError` variants for hashing, store or
    /// signing failures.
    pub async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> CredentialResult<String> {
        let password_hash = self.hash_password(password.to_string()).await?;
        let identity = Identity::new(username, email, password_hash);
        self.store.create(&identity).await?;

        info!(user_id = %identity.id, "identity created");

        let subject = TokenIdentity::new(identity.id, identity.email);
        Ok(self.tokens.issue(&subject, self.signup_token_ttl)?)
    }

    /// Verifies credentials and returns a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::UnknownUser` for an unregistered email and
    /// `CredentialError::BadCredentials` for a wrong password. Callers that
    /// report to end users must present both identically (see
    /// [`CredentialError::is_rejection`]).
    pub async fn login(&self, email: &str, password: &str) -> CredentialResult<String> {
        let Some(identity) = self.store.find_by_email(email).await? else {
            debug!("login attempt for unknown email");
            return Err(CredentialError::UnknownUser);
        };

        let valid = self
            .verify_password(password.to_string(), identity.password_hash.clone())
            .await?;
        if !valid {
            debug!(user_id = %identity.id, "login password mismatch");
            return Err(CredentialError::BadCredentials);
        }

        let subject = TokenIdentity::new(identity.id, identity.email);
        Ok(self.tokens.issue(&subject, self.login_token_ttl)?)
    }

    /// Hashes on the blocking pool; argon2 is deliberately slow.
    async fn hash_password(&self, password: String) -> CredentialResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CredentialError::hashing(e.to_string()))?
            .map_err(|e| CredentialError::hashing(e.to_string()))
    }

    async fn verify_password(&self, password: String, hash: String) -> CredentialResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| CredentialError::hashing(e.to_string()))?
            .map_err(|e| CredentialError::hashing(e.to_string()))
    }
}
