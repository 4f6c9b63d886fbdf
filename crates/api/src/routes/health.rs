use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether an AI provider is configured.
    pub ai_enabled: bool,
}

/// GET /api/health -- returns service, database and AI availability.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = idea_garden_db::health_check(&state.pool).await.is_ok();

    let (status, message) = if db_healthy {
        ("ok", "Idea garden API is running")
    } else {
        ("degraded", "Database is unreachable")
    };

    Json(HealthResponse {
        status,
        message,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        ai_enabled: state.chat.is_enabled(),
    })
}

/// Mount health check routes (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
