//! Argon2id password hashing.
//!
//! Hashes embed a per-call random salt and the cost parameters in PHC string
//! format, so verification needs no configuration beyond the stored hash.

use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::{PasswordHash, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::config::{ConfigError, PasswordConfig};

/// One-way salted password hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a hasher with the configured cost parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the parameters are outside
    /// argon2's accepted ranges.
    pub fn new(config: &PasswordConfig) -> Result<Self, ConfigError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| {
            ConfigError::InvalidValue(format!("invalid password hashing parameters: {e}"))
        })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a plaintext password for storage.
    ///
    /// Each call uses a fresh random salt, so hashing the same password twice
    /// yields different strings that both verify.
    ///
    /// # Errors
    ///
    /// Returns `argon2::password_hash::Error` if hashing fails (rare).
    pub fn hash(&self, plaintext: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(plaintext.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only if the stored hash is not
    /// a valid PHC string.
    pub fn verify(
        &self,
        plaintext: &str,
        hash: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        let result = self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed_hash);
        Ok(result.is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}
