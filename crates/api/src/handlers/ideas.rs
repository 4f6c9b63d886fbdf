//! Handlers for the `/ideas` resource plus the category and tag listings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use idea_garden_core::error::CoreError;
use idea_garden_core::types::DbId;
use idea_garden_core::validation::{clamp_related_limit, reject_blank_if_present, require_non_blank};
use idea_garden_db::models::embedding::RelatedIdea;
use idea_garden_db::models::idea::{CreateIdea, Idea, IdeaFilter, UpdateIdea};
use idea_garden_db::models::tag::Tag;
use idea_garden_db::repositories::{IdeaRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::query::{IdeaListParams, RelatedParams, SearchParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/ideas
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<IdeaListParams>,
) -> AppResult<Json<ApiResponse<Vec<Idea>>>> {
    let filter = params.into_filter()?;
    let ideas = IdeaRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::ok(ideas)))
}

/// GET /api/ideas/search?q=
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Idea>>>> {
    let q = require_non_blank(params.q.as_deref(), "Search query is required")?;
    let filter = IdeaFilter {
        q: Some(q.to_string()),
        ..Default::default()
    };
    let ideas = IdeaRepo::list(&state.pool, &filter).await?;
    tracing::debug!(q, results = ideas.len(), "Idea search");
    Ok(Json(ApiResponse::ok(ideas)))
}

/// GET /api/ideas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<Idea>>> {
    let idea = IdeaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Idea", id }))?;
    Ok(Json(ApiResponse::ok(idea)))
}

/// POST /api/ideas
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateIdea>,
) -> AppResult<(StatusCode, Json<ApiResponse<Idea>>)> {
    require_non_blank(Some(input.title.as_str()), "Title is required")?;

    let idea = IdeaRepo::create(&state.pool, &input).await?;
    tracing::info!(idea_id = idea.id, title = %idea.title, "Idea created");

    spawn_embedding_refresh(&state, &idea);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(idea).with_message("Idea created successfully")),
    ))
}

/// PUT /api/ideas/{id}
pub async fn update(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
    JsonBody(input): JsonBody<UpdateIdea>,
) -> AppResult<Json<ApiResponse<Idea>>> {
    reject_blank_if_present(input.title.as_deref(), "Title cannot be empty")?;

    let idea = IdeaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Idea", id }))?;
    tracing::info!(idea_id = id, "Idea updated");

    if input.title.is_some() || input.description.is_some() || input.content.is_some() {
        spawn_embedding_refresh(&state, &idea);
    }
    Ok(Json(
        ApiResponse::ok(idea).with_message("Idea updated successfully"),
    ))
}

/// DELETE /api/ideas/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !IdeaRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Idea", id }));
    }
    tracing::info!(idea_id = id, "Idea deleted");
    Ok(Json(ApiResponse::message("Idea deleted successfully")))
}

/// GET /api/ideas/{id}/related?limit=
pub async fn related(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
    QueryParams(params): QueryParams<RelatedParams>,
) -> AppResult<Json<ApiResponse<Vec<RelatedIdea>>>> {
    if !IdeaRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Idea", id }));
    }
    let limit = clamp_related_limit(params.limit);
    let related = state.embeddings.find_related(&state.pool, id, limit).await?;
    Ok(Json(ApiResponse::ok(related)))
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let categories = IdeaRepo::categories(&state.pool).await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Tag>>>> {
    let tags = TagRepo::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// Regenerate the idea's embedding in the background.
fn spawn_embedding_refresh(state: &AppState, idea: &Idea) {
    if !state.embeddings.is_enabled() {
        return;
    }
    let embeddings = state.embeddings.clone();
    let pool = state.pool.clone();
    let idea = idea.clone();
    tokio::spawn(async move {
        embeddings.refresh_idea(&pool, &idea).await;
    });
}
