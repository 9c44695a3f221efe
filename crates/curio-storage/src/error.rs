//! Storage error types for the catalog storage abstraction layer.
//!
//! This module defines all error types that can occur during item store
//! operations.

use std::fmt;

/// Errors that can occur during item store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested item was not found.
    #[error("Item not found: {id}")]
    NotFound {
        /// The ID of the item that was not found.
        id: String,
    },

    /// The storage backend could not be reached or failed mid-operation.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new `Unavailable` error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is an availability error.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Unavailable { .. } => ErrorCategory::Infrastructure,
        }
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Item not found.
    NotFound,
    /// Infrastructure/connection error.
    Infrastructure,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Infrastructure => write!(f, "infrastructure"),
        }
    }
}
