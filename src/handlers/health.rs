//! Health check handler

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use crate::state::AppState;

/// Public health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    /// `"ok"` when the store answers, `"unavailable"` otherwise
    pub status: String,
}

/// GET /api/health
///
/// Reports whether the user store is reachable. Intended for load
/// balancers; exposes no detail about the failure.
///
/// # Example
/// ```bash
/// curl http://localhost:5000/api/health
/// # Returns: {"status":"ok"}
/// ```
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthCheckResponse>) {
    match state.store.ping().await {
        Ok(()) => {
            tracing::debug!("Health check requested - store reachable");
            (
                StatusCode::OK,
                Json(HealthCheckResponse {
                    status: "ok".to_string(),
                }),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed - store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthCheckResponse {
                    status: "unavailable".to_string(),
                }),
            )
        }
    }
}
