//! In-memory credential store.

use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;

use crate::CredentialResult;
use crate::error::CredentialError;
use crate::storage::identity::{CredentialStore, Identity};

/// In-memory credential store using papaya lock-free maps.
///
/// Identities are kept in a primary map keyed by id, with a secondary
/// email-to-id index that enforces the uniqueness constraint without locks.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    identities: PapayaHashMap<String, Identity>,
    email_index: PapayaHashMap<String, String>,
}

impl InMemoryCredentialStore {
    /// Creates a new, empty credential store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identities: PapayaHashMap::new(),
            email_index: PapayaHashMap::new(),
        }
    }

    /// Returns the number of stored identities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.identities.pin().len()
    }

    /// Returns `true` if no identities are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_id(&self, id: &str) -> CredentialResult<Option<Identity>> {
        let guard = self.identities.pin();
        Ok(guard.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> CredentialResult<Option<Identity>> {
        let index = self.email_index.pin();
        let Some(id) = index.get(email) else {
            return Ok(None);
        };
        let guard = self.identities.pin();
        Ok(guard.get(id).cloned())
    }

    async fn create(&self, identity: &Identity) -> CredentialResult<()> {
        // Claim the email first so two concurrent sign-ups cannot both insert.
        let index = self.email_index.pin();
        if index
            .try_insert(identity.email.clone(), identity.id.clone())
            .is_err()
        {
            return Err(CredentialError::DuplicateEmail);
        }

        let guard = self.identities.pin();
        guard.insert(identity.id.clone(), identity.clone());
        Ok(())
    }
}
