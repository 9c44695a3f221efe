use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Curio Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// Readiness probe.
///
/// The cache is an accelerator, so an unreachable cache reports as degraded
/// rather than failing the probe; reads keep working through the store.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let cache = match state.cache.get("readyz:probe").await {
        Ok(_) => "ok",
        Err(_) => "degraded",
    };

    let body = json!({
        "status": "ready",
        "cache": cache,
    });
    (StatusCode::OK, Json(body))
}
