//! Handlers for documents, scoped to an idea.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use idea_garden_core::error::CoreError;
use idea_garden_core::types::DbId;
use idea_garden_core::validation::{reject_blank_if_present, require_non_blank};
use idea_garden_db::models::document::{CreateDocument, Document, UpdateDocument};
use idea_garden_db::models::document_version::VersionAuthor;
use idea_garden_db::repositories::{DocumentRepo, IdeaRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Fail with 404 unless the idea exists.
pub(crate) async fn ensure_idea_exists(state: &AppState, idea_id: DbId) -> AppResult<()> {
    if IdeaRepo::exists(&state.pool, idea_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Idea",
            id: idea_id,
        }))
    }
}

fn document_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Document",
        id,
    })
}

/// GET /api/ideas/{id}/documents
pub async fn list(
    State(state): State<AppState>,
    PathParams(idea_id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<Vec<Document>>>> {
    ensure_idea_exists(&state, idea_id).await?;
    let documents = DocumentRepo::list_for_idea(&state.pool, idea_id).await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// GET /api/ideas/{id}/documents/{document_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParams((idea_id, id)): PathParams<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<Document>>> {
    let document = DocumentRepo::find(&state.pool, idea_id, id)
        .await?
        .ok_or_else(|| document_not_found(id))?;
    Ok(Json(ApiResponse::ok(document)))
}

/// POST /api/ideas/{id}/documents
///
/// Content, when present, is recorded as version 1.
pub async fn create(
    State(state): State<AppState>,
    PathParams(idea_id): PathParams<DbId>,
    JsonBody(input): JsonBody<CreateDocument>,
) -> AppResult<(StatusCode, Json<ApiResponse<Document>>)> {
    require_non_blank(Some(input.title.as_str()), "Title is required")?;
    ensure_idea_exists(&state, idea_id).await?;

    let document =
        DocumentRepo::create_with_initial_version(&state.pool, idea_id, &input, VersionAuthor::User)
            .await?;
    tracing::info!(idea_id, document_id = document.id, "Document created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(document).with_message("Document created successfully")),
    ))
}

/// PUT /api/ideas/{id}/documents/{document_id}
///
/// A content change records a new version.
pub async fn update(
    State(state): State<AppState>,
    PathParams((idea_id, id)): PathParams<(DbId, DbId)>,
    JsonBody(input): JsonBody<UpdateDocument>,
) -> AppResult<Json<ApiResponse<Document>>> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    reject_blank_if_present(input.title.as_deref(), "Title cannot be empty")?;

    let document = DocumentRepo::update(&state.pool, idea_id, id, &input)
        .await?
        .ok_or_else(|| document_not_found(id))?;
    tracing::info!(idea_id, document_id = id, "Document updated");

    Ok(Json(
        ApiResponse::ok(document).with_message("Document updated successfully"),
    ))
}

/// DELETE /api/ideas/{id}/documents/{document_id}
pub async fn delete(
    State(state): State<AppState>,
    PathParams((idea_id, id)): PathParams<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !DocumentRepo::delete(&state.pool, idea_id, id).await? {
        return Err(document_not_found(id));
    }
    tracing::info!(idea_id, document_id = id, "Document deleted");
    Ok(Json(ApiResponse::message("Document deleted successfully")))
}
