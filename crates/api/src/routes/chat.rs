//! Route definitions for the chat and document-generation endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Chat routes mounted at `/api/chat`.
///
/// ```text
/// GET    /template/{category}       -> template
/// POST   /generate-document         -> generate_document
/// POST   /create-document           -> create_document
/// POST   /save-conversation         -> save_conversation
/// GET    /conversation/{idea_id}    -> conversation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/template/{category}", get(chat::template))
        .route("/generate-document", post(chat::generate_document))
        .route("/create-document", post(chat::create_document))
        .route("/save-conversation", post(chat::save_conversation))
        .route("/conversation/{idea_id}", get(chat::conversation))
}

/// The streaming overview route, mounted at the root without the request
/// timeout.
///
/// ```text
/// POST   /api/chat/project-overview -> project_overview
/// ```
pub fn stream_router() -> Router<AppState> {
    Router::new().route("/api/chat/project-overview", post(chat::project_overview))
}
