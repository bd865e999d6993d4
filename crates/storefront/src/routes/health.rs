//! Health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::db;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies session store connectivity when sessions live in `PostgreSQL`.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };

    match db::ping(pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
