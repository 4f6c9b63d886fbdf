use axum::routing::post;
use axum::Router;

use crate::handlers::embeddings;
use crate::state::AppState;

/// ```text
/// POST   /update-all   -> update_all
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/update-all", post(embeddings::update_all))
}
