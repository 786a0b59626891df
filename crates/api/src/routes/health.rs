//! Health check endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Database reachability: `up` or `down`.
    pub database: &'static str,
}

/// GET /health - Liveness plus a database ping.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, status, database) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "up"),
        Err(e) => {
            warn!(error = %e, "Health check database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
