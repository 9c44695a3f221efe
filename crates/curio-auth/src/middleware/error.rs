//! Error response handling for authentication extractors.
//!
//! Responses carry a machine-readable code and a deliberately generic
//! message: the body never reveals which verification check failed.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Missing => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Malformed { .. } | Self::InvalidSignature | Self::Expired => {
                (StatusCode::UNAUTHORIZED, "invalid_token")
            }
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
        };

        let message = if status == StatusCode::UNAUTHORIZED {
            "Authentication required"
        } else {
            "Internal server error"
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        let mut headers = HeaderMap::new();
        if status == StatusCode::UNAUTHORIZED {
            let www_auth = format!("Bearer error=\"{code}\"");
            if let Ok(value) = HeaderValue::from_str(&www_auth) {
                headers.insert(header::WWW_AUTHENTICATE, value);
            }
        }

        (status, headers, Json(body)).into_response()
    }
}
