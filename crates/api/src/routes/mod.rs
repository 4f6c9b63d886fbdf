pub mod action_plans;
pub mod chat;
pub mod documents;
pub mod embeddings;
pub mod export;
pub mod health;
pub mod ideas;
pub mod stats;
pub mod versions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy (idea-scoped routes share the `{id}` segment):
///
/// ```text
/// /health                                          service health
///
/// /ideas                                           list (filters), create
/// /ideas/search                                    search (?q=)
/// /ideas/{id}                                      get, update, delete
/// /ideas/{id}/related                              related ideas (?limit=)
///
/// /ideas/{id}/documents                            list, create
/// /ideas/{id}/documents/{document_id}              get, update, delete
///
/// /ideas/{id}/action-plan                          current plan
/// /ideas/{id}/action-plans                         list, create
/// /ideas/{id}/action-plans/generate                generate (POST)
/// /ideas/{id}/action-plans/{plan_id}               get, update, delete
///
/// /documents/{document_id}/versions                list, create
/// /documents/{document_id}/versions/{number}       get
/// /documents/{document_id}/versions/{number}/diff  compare (?against=)
///
/// /categories                                      categories in use
/// /tags                                            all tags
///
/// /chat/template/{category}                        document template
/// /chat/generate-document                          generate (POST)
/// /chat/create-document                            accept (POST)
/// /chat/save-conversation                          save (POST)
/// /chat/conversation/{idea_id}                     latest saved conversation
///
/// /embeddings/update-all                           regenerate all (POST)
///
/// /export/ideas                                    export (?format=&filters)
/// /export/idea/{id}/full                           idea with documents, plans
/// /export/import/ideas                             import JSON array (POST)
///
/// /analytics/usage                                 activity (?period=)
/// /system/stats                                    garden-wide statistics
/// ```
///
/// `POST /api/chat/project-overview` streams and is mounted separately by
/// [`chat::stream_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/ideas", ideas::router())
        .nest("/ideas/{id}/documents", documents::router())
        .nest("/ideas/{id}", action_plans::router())
        .nest("/documents/{document_id}/versions", versions::router())
        .route("/categories", get(handlers::ideas::list_categories))
        .route("/tags", get(handlers::ideas::list_tags))
        .nest("/chat", chat::router())
        .nest("/embeddings", embeddings::router())
        .nest("/export", export::router())
        .nest("/analytics", stats::analytics_router())
        .nest("/system", stats::system_router())
}
