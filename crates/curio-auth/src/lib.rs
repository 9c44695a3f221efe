//! # curio-auth
//!
//! Authentication for the Curio catalog server.
//!
//! This crate provides:
//! - Argon2id password hashing and verification
//! - Signed, time-limited bearer tokens (HS256)
//! - Sign-up and login session flows
//! - A request-level token gate with axum extractors
//! - Identity storage with an in-memory backend
//!
//! ## Modules
//!
//! - [`config`] - Authentication configuration
//! - [`error`] - Auth and credential error types
//! - [`password`] - Password hashing
//! - [`token`] - Token issuance and verification
//! - [`session`] - Sign-up and login use cases
//! - [`middleware`] - Token gate and axum extractors
//! - [`storage`] - Identity records and credential stores

pub mod config;
pub mod error;
pub mod middleware;
pub mod password;
pub mod session;
pub mod storage;
pub mod token;

pub use config::{AuthConfig, ConfigError, PasswordConfig};
pub use error::{AuthError, CredentialError, ErrorCategory};
pub use middleware::{AuthGate, AuthState, BearerAuth, GateMode, OptionalBearerAuth};
pub use password::PasswordHasher;
pub use session::SessionService;
pub use storage::{CredentialStore, Identity, InMemoryCredentialStore};
pub use token::{Claims, TokenIdentity, TokenService};

/// Type alias for token operation results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Type alias for credential operation results.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Shared trait object for credential stores.
pub type DynCredentialStore = std::sync::Arc<dyn CredentialStore>;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::AuthConfig;
    pub use crate::error::{AuthError, CredentialError};
    pub use crate::middleware::{AuthState, BearerAuth, GateMode, OptionalBearerAuth};
    pub use crate::password::PasswordHasher;
    pub use crate::session::SessionService;
    pub use crate::storage::{CredentialStore, Identity};
    pub use crate::token::{TokenIdentity, TokenService};
    pub use crate::{AuthResult, CredentialResult, DynCredentialStore};
}
