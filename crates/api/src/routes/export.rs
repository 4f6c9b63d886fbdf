//! Route definitions for export and import, mounted at `/api/export`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// ```text
/// GET    /ideas              -> export_ideas
/// GET    /idea/{id}/full     -> export_full_idea
/// POST   /import/ideas       -> import_ideas
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ideas", get(export::export_ideas))
        .route("/idea/{id}/full", get(export::export_full_idea))
        .route("/import/ideas", post(export::import_ideas))
}
