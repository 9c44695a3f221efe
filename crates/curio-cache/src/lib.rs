//! Caching layer for the curio catalog.
//!
//! The crate provides the [`ItemCache`] trait over raw bytes, two backends
//! (in-process [`MemoryItemCache`] and Redis-backed [`RedisItemCache`]), and
//! [`CacheAsideReader`], the read path that combines a cache with an
//! [`ItemStore`](curio_storage::ItemStore).
//!
//! The reader treats the cache as an accelerator, not a dependency: any
//! cache failure is logged and the read is served from the store.

pub mod error;
pub mod memory;
pub mod reader;
pub mod redis;
pub mod traits;

pub use error::CacheError;
pub use memory::MemoryItemCache;
pub use reader::CacheAsideReader;
pub use self::redis::RedisItemCache;
pub use traits::ItemCache;

/// Convenience alias for cache operation results.
pub type CacheResult<T> = Result<T, CacheError>;

/// Shared trait object for cache backends.
pub type DynItemCache = std::sync::Arc<dyn ItemCache>;

/// Commonly used types.
pub mod prelude {
    pub use crate::error::CacheError;
    pub use crate::memory::MemoryItemCache;
    pub use crate::reader::CacheAsideReader;
    pub use crate::traits::ItemCache;
    pub use crate::{CacheResult, DynItemCache};
}
