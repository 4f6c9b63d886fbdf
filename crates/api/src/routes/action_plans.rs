//! Route definitions for action plans, nested under `/ideas/{idea_id}`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::action_plans;
use crate::state::AppState;

/// ```text
/// GET    /action-plan                    -> current
/// GET    /action-plans                   -> list
/// POST   /action-plans                   -> create
/// POST   /action-plans/generate          -> generate
/// GET    /action-plans/{plan_id}         -> get_by_id
/// PUT    /action-plans/{plan_id}         -> update
/// DELETE /action-plans/{plan_id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/action-plan", get(action_plans::current))
        .route(
            "/action-plans",
            get(action_plans::list).post(action_plans::create),
        )
        .route("/action-plans/generate", post(action_plans::generate))
        .route(
            "/action-plans/{plan_id}",
            get(action_plans::get_by_id)
                .put(action_plans::update)
                .delete(action_plans::delete),
        )
}
