//! Mapping of core errors to GraphQL errors.
//!
//! Every error leaving the schema carries a machine-readable `code`
//! extension. Credential rejections (unknown email, wrong password) collapse
//! into one identical message so a caller cannot probe which addresses are
//! registered. Infrastructure failures surface as `INTERNAL` with no detail.

use async_graphql::{Error, ErrorExtensions};
use curio_auth::CredentialError;
use curio_storage::StoreError;
use tracing::{error, warn};

/// Error extension code for authentication and credential rejections.
pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";

/// Error extension code for client input the store refused.
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";

/// Error extension code for infrastructure failures.
pub const INTERNAL: &str = "INTERNAL";

fn with_code(message: &str, code: &'static str) -> Error {
    Error::new(message).extend_with(|_, e| e.set("code", code))
}

/// The error returned when a request needs an identity and has none.
#[must_use]
pub fn unauthenticated() -> Error {
    with_code("Authentication required", UNAUTHENTICATED)
}

/// Maps a sign-up or login failure to a GraphQL error.
///
/// `UnknownUser` and `BadCredentials` produce byte-identical errors.
#[must_use]
pub fn credential_error(err: &CredentialError) -> Error {
    if err.is_rejection() {
        return with_code("Invalid email or password", UNAUTHENTICATED);
    }

    match err {
        CredentialError::DuplicateEmail => {
            with_code("Email already registered", BAD_USER_INPUT)
        }
        CredentialError::Token(token_err) => {
            error!(category = %token_err.category(), "token issuance failed");
            with_code("Internal server error", INTERNAL)
        }
        other => {
            error!(category = %other.category(), "credential operation failed");
            with_code("Internal server error", INTERNAL)
        }
    }
}

/// Maps an item-store failure to a GraphQL error.
///
/// `NotFound` is not expected here: the resolvers translate absence into a
/// null field before this mapping applies.
#[must_use]
pub fn store_error(err: &StoreError) -> Error {
    warn!(category = %err.category(), "item store operation failed");
    with_code("Internal server error", INTERNAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(err: &Error) -> String {
        let extensions = err.extensions.as_ref().unwrap();
        let value = extensions.get("code").unwrap();
        match value {
            async_graphql::Value::String(s) => s.clone(),
            other => panic!("unexpected extension value: {other:?}"),
        }
    }

    #[test]
    fn test_rejections_are_indistinguishable() {
        let unknown = credential_error(&CredentialError::UnknownUser);
        let bad_pass = credential_error(&CredentialError::BadCredentials);

        assert_eq!(unknown.message, bad_pass.message);
        assert_eq!(code_of(&unknown), code_of(&bad_pass));
        assert_eq!(code_of(&unknown), UNAUTHENTICATED);
    }

    #[test]
    fn test_duplicate_email_is_user_input() {
        let err = credential_error(&CredentialError::DuplicateEmail);
        assert_eq!(code_of(&err), BAD_USER_INPUT);
        assert!(err.message.contains("already registered"));
    }

    #[test]
    fn test_infrastructure_failures_leak_no_detail() {
        let err = credential_error(&CredentialError::unavailable(
            "connection refused to 10.0.0.7:5432",
        ));
        assert_eq!(code_of(&err), INTERNAL);
        assert!(!err.message.contains("10.0.0.7"));

        let err = store_error(&StoreError::unavailable("dial tcp: timeout"));
        assert_eq!(code_of(&err), INTERNAL);
        assert!(!err.message.contains("dial"));
    }

    #[test]
    fn test_unauthenticated_code() {
        assert_eq!(code_of(&unauthenticated()), UNAUTHENTICATED);
    }
}
