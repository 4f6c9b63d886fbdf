//! Route definitions for document versions, nested under
//! `/documents/{document_id}/versions`.

use axum::routing::get;
use axum::Router;

use crate::handlers::versions;
use crate::state::AppState;

/// ```text
/// GET    /                         -> list
/// POST   /                         -> create
/// GET    /latest                   -> latest
/// GET    /{version_number}         -> get_by_number
/// GET    /{version_number}/diff    -> diff
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(versions::list).post(versions::create))
        .route("/latest", get(versions::latest))
        .route("/{version_number}", get(versions::get_by_number))
        .route("/{version_number}/diff", get(versions::diff))
}
