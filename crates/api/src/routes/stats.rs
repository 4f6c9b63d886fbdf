//! Route definitions for analytics and system statistics.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Mounted at `/api/analytics`.
///
/// ```text
/// GET    /usage   -> usage
/// ```
pub fn analytics_router() -> Router<AppState> {
    Router::new().route("/usage", get(stats::usage))
}

/// Mounted at `/api/system`.
///
/// ```text
/// GET    /stats   -> system_stats
/// ```
pub fn system_router() -> Router<AppState> {
    Router::new().route("/stats", get(stats::system_stats))
}
