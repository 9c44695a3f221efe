//! Identity storage backends.

mod identity;
mod memory;

pub use identity::{CredentialStore, Identity};
pub use memory::InMemoryCredentialStore;
