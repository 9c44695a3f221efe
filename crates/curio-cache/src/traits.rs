//! Cache trait for the key/value item cache.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// A fast key/value byte cache.
///
/// Values are opaque byte strings; the read path stores the serde_json
/// encoding of a record under its id-derived key. Entries have no built-in
/// expiry unless a TTL is passed to [`set`](ItemCache::set).
///
/// Implementations must be thread-safe (`Send + Sync`); a single handle is
/// shared by all concurrent requests.
#[async_trait]
pub trait ItemCache: Send + Sync {
    /// Gets a cached value by key.
    ///
    /// Returns `None` on a miss (including an expired entry).
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Unavailable` if the backend cannot be reached.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Sets a value, replacing any existing entry under the same key.
    ///
    /// With `ttl = None` the entry lives until it is overwritten or
    /// invalidated; with `Some(ttl)` it expires after that duration.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Unavailable` if the backend cannot be reached.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Removes an entry. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Unavailable` if the backend cannot be reached.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;
}
