//! Liveness endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /healthz`: reports the running core version.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: mindful_core::version().into(),
    })
}
