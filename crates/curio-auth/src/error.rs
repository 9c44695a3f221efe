//! Error types for authentication and credential handling.

use std::fmt;

/// Errors produced while verifying or issuing bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No bearer token was presented.
    #[error("Missing bearer token")]
    Missing,

    /// The token string could not be parsed into the expected structure.
    #[error("Malformed token: {message}")]
    Malformed {
        /// Description of the parse failure.
        message: String,
    },

    /// The token signature does not match the configured secret.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token's expiry timestamp is in the past.
    #[error("Token expired")]
    Expired,

    /// Token issuance or verification failed for an internal reason.
    #[error("Internal auth error: {message}")]
    Internal {
        /// Description of the internal failure.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `Malformed` error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if the error means a presented token failed verification.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Malformed { .. } | Self::InvalidSignature | Self::Expired
        )
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Missing => ErrorCategory::Authentication,
            Self::Malformed { .. } | Self::InvalidSignature | Self::Expired => ErrorCategory::Token,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::malformed(err.to_string()),
        }
    }
}

/// Errors produced by sign-up, login and the credential store.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// No identity exists for the given email.
    #[error("Unknown user")]
    UnknownUser,

    /// The password did not match the stored hash.
    #[error("Bad credentials")]
    BadCredentials,

    /// An identity with this email already exists.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Password hashing or verification failed internally.
    #[error("Password hashing failed: {message}")]
    Hashing {
        /// Description of the hashing failure.
        message: String,
    },

    /// The credential store could not be reached.
    #[error("Credential store unavailable: {message}")]
    Unavailable {
        /// Description of the connectivity failure.
        message: String,
    },

    /// Token issuance failed after the credential checks passed.
    #[error(transparent)]
    Token(#[from] AuthError),
}

impl CredentialError {
    /// Creates a new `Hashing` error.
    #[must_use]
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// Creates a new `Unavailable` error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns `true` if the caller supplied credentials that do not match
    /// an identity. These are reported uniformly to avoid revealing whether
    /// the email or the password was wrong.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::UnknownUser | Self::BadCredentials)
    }

    /// Returns `true` for the email-uniqueness violation on sign-up.
    #[must_use]
    pub fn is_duplicate_email(&self) -> bool {
        matches!(self, Self::DuplicateEmail)
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownUser | Self::BadCredentials => ErrorCategory::Authentication,
            Self::DuplicateEmail => ErrorCategory::Validation,
            Self::Hashing { .. } => ErrorCategory::Internal,
            Self::Unavailable { .. } => ErrorCategory::Infrastructure,
            Self::Token(err) => err.category(),
        }
    }
}

/// Categories of auth errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Identity verification failures.
    Authentication,
    /// Token validation failures.
    Token,
    /// Request validation failures.
    Validation,
    /// Store connectivity failures.
    Infrastructure,
    /// Internal errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Token => write!(f, "token"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::Missing.to_string(), "Missing bearer token");
        assert_eq!(AuthError::Expired.to_string(), "Token expired");
        assert_eq!(
            AuthError::malformed("bad segment count").to_string(),
            "Malformed token: bad segment count"
        );
    }

    #[test]
    fn test_auth_error_categories() {
        assert_eq!(AuthError::Missing.category(), ErrorCategory::Authentication);
        assert_eq!(AuthError::Expired.category(), ErrorCategory::Token);
        assert_eq!(
            AuthError::InvalidSignature.category(),
            ErrorCategory::Token
        );
        assert_eq!(
            AuthError::internal("join error").category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_jwt_error_mapping() {
        use jsonwebtoken::errors::{Error, ErrorKind};

        let err: AuthError = Error::from(ErrorKind::ExpiredSignature).into();
        assert_eq!(err, AuthError::Expired);

        let err: AuthError = Error::from(ErrorKind::InvalidSignature).into();
        assert_eq!(err, AuthError::InvalidSignature);

        let err: AuthError = Error::from(ErrorKind::InvalidToken).into();
        assert!(matches!(err, AuthError::Malformed { .. }));
    }

    #[test]
    fn test_credential_rejections_are_uniform_kinds() {
        assert!(CredentialError::UnknownUser.is_rejection());
        assert!(CredentialError::BadCredentials.is_rejection());
        assert!(!CredentialError::DuplicateEmail.is_rejection());
        assert!(CredentialError::DuplicateEmail.is_duplicate_email());
    }

    #[test]
    fn test_credential_error_categories() {
        assert_eq!(
            CredentialError::UnknownUser.category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            CredentialError::DuplicateEmail.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            CredentialError::unavailable("connection refused").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(
            CredentialError::Token(AuthError::Expired).category(),
            ErrorCategory::Token
        );
    }
}
