//! Handlers for document versions.
//!
//! Versions are addressed by document id alone; the document's idea is not
//! part of the path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use idea_garden_core::diff::{diff_documents, DocumentDiff};
use idea_garden_core::error::CoreError;
use idea_garden_core::types::DbId;
use idea_garden_db::models::document_version::{CreateDocumentVersion, DocumentVersion};
use idea_garden_db::repositories::{DocumentRepo, DocumentVersionRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::query::DiffParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Comparison between two versions of one document.
#[derive(Debug, Serialize)]
pub struct VersionDiff {
    pub document_id: DbId,
    pub from_version: i64,
    pub to_version: i64,
    #[serde(flatten)]
    pub diff: DocumentDiff,
}

async fn ensure_document_exists(state: &AppState, document_id: DbId) -> AppResult<()> {
    DocumentRepo::find_by_id(&state.pool, document_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id: document_id,
        }))
}

async fn find_version(
    state: &AppState,
    document_id: DbId,
    version_number: i64,
) -> AppResult<DocumentVersion> {
    DocumentVersionRepo::find_by_number(&state.pool, document_id, version_number)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Version",
            id: version_number,
        }))
}

/// GET /api/documents/{document_id}/versions
pub async fn list(
    State(state): State<AppState>,
    PathParams(document_id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<Vec<DocumentVersion>>>> {
    ensure_document_exists(&state, document_id).await?;
    let versions = DocumentVersionRepo::list_for_document(&state.pool, document_id).await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// GET /api/documents/{document_id}/versions/{version_number}
pub async fn get_by_number(
    State(state): State<AppState>,
    PathParams((document_id, version_number)): PathParams<(DbId, i64)>,
) -> AppResult<Json<ApiResponse<DocumentVersion>>> {
    ensure_document_exists(&state, document_id).await?;
    let version = find_version(&state, document_id, version_number).await?;
    Ok(Json(ApiResponse::ok(version)))
}

/// GET /api/documents/{document_id}/versions/latest
///
/// 404 when the document has no versions yet.
pub async fn latest(
    State(state): State<AppState>,
    PathParams(document_id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<DocumentVersion>>> {
    ensure_document_exists(&state, document_id).await?;
    let version = DocumentVersionRepo::latest(&state.pool, document_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Version",
            id: document_id,
        }))?;
    Ok(Json(ApiResponse::ok(version)))
}

/// POST /api/documents/{document_id}/versions
pub async fn create(
    State(state): State<AppState>,
    PathParams(document_id): PathParams<DbId>,
    JsonBody(input): JsonBody<CreateDocumentVersion>,
) -> AppResult<(StatusCode, Json<ApiResponse<DocumentVersion>>)> {
    ensure_document_exists(&state, document_id).await?;

    let version = DocumentVersionRepo::create(
        &state.pool,
        document_id,
        &input.content,
        input.created_by.unwrap_or_default(),
    )
    .await?;
    tracing::info!(
        document_id,
        version_number = version.version_number,
        created_by = %version.created_by,
        "Document version recorded"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(version))))
}

/// GET /api/documents/{document_id}/versions/{version_number}/diff?against=
///
/// Compares `against` (default: the previous version) to `version_number`.
pub async fn diff(
    State(state): State<AppState>,
    PathParams((document_id, version_number)): PathParams<(DbId, i64)>,
    QueryParams(params): QueryParams<DiffParams>,
) -> AppResult<Json<ApiResponse<VersionDiff>>> {
    ensure_document_exists(&state, document_id).await?;

    let against = match params.against {
        Some(n) => n,
        None if version_number > 1 => version_number - 1,
        None => {
            return Err(AppError::BadRequest(
                "Version 1 has no previous version; pass ?against= to compare".to_string(),
            ))
        }
    };

    let base = find_version(&state, document_id, against).await?;
    let target = find_version(&state, document_id, version_number).await?;

    Ok(Json(ApiResponse::ok(VersionDiff {
        document_id,
        from_version: base.version_number,
        to_version: target.version_number,
        diff: diff_documents(&base.content, &target.content),
    })))
}
