//! Authentication configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! secret = "change-me-to-a-long-random-value"
//! signup_token_ttl = "365days"
//! login_token_ttl = "1day"
//!
//! [auth.password]
//! memory_kib = 19456
//! iterations = 2
//! parallelism = 1
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration errors raised during validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),
}

/// Root authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Symmetric secret used to sign and verify bearer tokens.
    /// Must be set; the process refuses to start without one.
    pub secret: String,

    /// Token lifetime granted on sign-up.
    /// Long-lived so a fresh account stays signed in.
    #[serde(with = "humantime_serde")]
    pub signup_token_ttl: Duration,

    /// Token lifetime granted on login.
    #[serde(with = "humantime_serde")]
    pub login_token_ttl: Duration,

    /// Password hashing cost parameters.
    pub password: PasswordConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            signup_token_ttl: Duration::from_secs(365 * 24 * 3600), // 1 year
            login_token_ttl: Duration::from_secs(24 * 3600),        // 1 day
            password: PasswordConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no secret is configured, or
    /// `ConfigError::InvalidValue` if a lifetime or hashing parameter is out
    /// of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Missing("auth.secret".to_string()));
        }

        if self.secret.len() < 16 {
            return Err(ConfigError::InvalidValue(
                "auth.secret must be at least 16 bytes".to_string(),
            ));
        }

        if self.signup_token_ttl.is_zero() {
            return Err(ConfigError::InvalidValue(
                "auth.signup_token_ttl must be > 0".to_string(),
            ));
        }

        if self.login_token_ttl.is_zero() {
            return Err(ConfigError::InvalidValue(
                "auth.login_token_ttl must be > 0".to_string(),
            ));
        }

        self.password.validate()
    }
}

/// Argon2id cost parameters.
///
/// Defaults follow the argon2 crate's recommended parameters. Raising them
/// slows both sign-up and login; lower them only in tests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,

    /// Number of passes over memory.
    pub iterations: u32,

    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19456, // 19 MiB
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl PasswordConfig {
    /// Validates the hashing parameters against argon2's minimums.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a parameter is below the
    /// algorithm's minimum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_kib < 8 {
            return Err(ConfigError::InvalidValue(
                "auth.password.memory_kib must be >= 8".to_string(),
            ));
        }

        if self.iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "auth.password.iterations must be > 0".to_string(),
            ));
        }

        if self.parallelism == 0 {
            return Err(ConfigError::InvalidValue(
                "auth.password.parallelism must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
