//! Route definitions for the `/ideas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ideas;
use crate::state::AppState;

/// Idea routes mounted at `/ideas`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /search           -> search
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/related     -> related
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ideas::list).post(ideas::create))
        .route("/search", get(ideas::search))
        .route(
            "/{id}",
            get(ideas::get_by_id)
                .put(ideas::update)
                .delete(ideas::delete),
        )
        .route("/{id}/related", get(ideas::related))
}
