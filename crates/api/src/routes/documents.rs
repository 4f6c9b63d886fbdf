//! Route definitions for documents, nested under `/ideas/{idea_id}/documents`.

use axum::routing::get;
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{document_id}    -> get_by_id
/// PUT    /{document_id}    -> update
/// DELETE /{document_id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(documents::list).post(documents::create))
        .route(
            "/{document_id}",
            get(documents::get_by_id)
                .put(documents::update)
                .delete(documents::delete),
        )
}
