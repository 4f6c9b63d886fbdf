//! Handlers for the project-overview chat, document generation and saved
//! conversations.
//!
//! Bodies use camelCase to match the browser client.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::StreamExt;
use idea_garden_ai::chat::ChatRequest;
use idea_garden_core::chat::ChatMessage;
use idea_garden_core::diff::{diff_documents, DocumentDiff};
use idea_garden_core::prompt::Category;
use idea_garden_core::template::render;
use idea_garden_core::types::DbId;
use idea_garden_core::validation::require_non_blank;
use idea_garden_db::models::conversation::{Conversation, SaveConversation};
use idea_garden_db::models::document::{CreateDocument, Document, DocumentType};
use idea_garden_db::models::document_version::VersionAuthor;
use idea_garden_db::repositories::{ConversationRepo, DocumentRepo, DocumentVersionRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::handlers::documents::ensure_idea_exists;
use crate::query::TemplateParams;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A document-generation request, optionally carrying the previous draft.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentRequest {
    #[serde(flatten)]
    pub chat: ChatRequest,
    #[serde(default)]
    pub previous_document: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedDocument {
    pub document: String,
    /// Line diff against the previous draft, when one was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DocumentDiff>,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub category: &'static str,
    pub template: String,
    /// The template with its placeholders filled, when `?title=` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// An accepted AI draft to store as a document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeneratedDocument {
    pub idea_id: DbId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConversationRequest {
    pub idea_id: DbId,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub generated_document: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConversation {
    pub conversation_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/chat/project-overview
///
/// Streams `data: {"content": ...}` frames ending in `data: [DONE]`. A
/// provider failure ends the body with a single error frame instead.
pub async fn project_overview(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Response {
    let frames = state.chat.stream_overview(&request).await;
    let body = Body::from_stream(frames.map(Ok::<_, Infallible>));

    (
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        body,
    )
        .into_response()
}

/// GET /api/chat/template/{category}
pub async fn template(
    PathParams(category): PathParams<String>,
    QueryParams(params): QueryParams<TemplateParams>,
) -> Json<ApiResponse<TemplateResponse>> {
    let category = Category::from_key(Some(&category));
    let template = category.document_template();
    let preview = params
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|title| {
            render(
                &template,
                title,
                params.description.as_deref(),
                chrono::Utc::now().date_naive(),
            )
        });

    Json(ApiResponse::ok(TemplateResponse {
        category: category.as_str(),
        template,
        preview,
    }))
}

/// POST /api/chat/generate-document
pub async fn generate_document(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<GenerateDocumentRequest>,
) -> AppResult<Json<ApiResponse<GeneratedDocument>>> {
    let document = state.chat.generate_document(&request.chat).await?;
    let diff = request
        .previous_document
        .as_deref()
        .map(|previous| diff_documents(previous, &document));

    Ok(Json(ApiResponse::ok(GeneratedDocument { document, diff })))
}

/// POST /api/chat/create-document
///
/// Stores an accepted draft with its first version. A failure to record
/// the version is logged and does not fail the request.
pub async fn create_document(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateGeneratedDocument>,
) -> AppResult<(StatusCode, Json<ApiResponse<Document>>)> {
    require_non_blank(Some(input.title.as_str()), "Title is required")?;
    ensure_idea_exists(&state, input.idea_id).await?;

    let create = CreateDocument {
        title: input.title,
        content: Some(input.content),
        document_type: Some(DocumentType::AiGenerated),
        conversation_id: input.conversation_id,
    };
    let document = DocumentRepo::create(&state.pool, input.idea_id, &create).await?;
    tracing::info!(
        idea_id = input.idea_id,
        document_id = document.id,
        "AI document saved"
    );

    if let Some(content) = document.content.as_deref().filter(|c| !c.is_empty()) {
        if let Err(e) =
            DocumentVersionRepo::create(&state.pool, document.id, content, VersionAuthor::Ai).await
        {
            tracing::error!(
                document_id = document.id,
                error = %e,
                "Failed to record initial version of AI document"
            );
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(document).with_message("Document created successfully")),
    ))
}

/// POST /api/chat/save-conversation
pub async fn save_conversation(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SaveConversationRequest>,
) -> AppResult<Json<ApiResponse<SavedConversation>>> {
    ensure_idea_exists(&state, input.idea_id).await?;

    let id = format!(
        "conv_{}_{}",
        input.idea_id,
        chrono::Utc::now().timestamp_millis()
    );
    let conversation = ConversationRepo::save(
        &state.pool,
        &SaveConversation {
            id,
            idea_id: input.idea_id,
            messages: input.messages,
            generated_document: input.generated_document,
        },
    )
    .await?;
    tracing::info!(
        idea_id = input.idea_id,
        conversation_id = %conversation.id,
        messages = conversation.messages.0.len(),
        "Conversation saved"
    );

    Ok(Json(
        ApiResponse::ok(SavedConversation {
            conversation_id: conversation.id,
        })
        .with_message("Conversation saved successfully"),
    ))
}

/// GET /api/chat/conversation/{idea_id}
///
/// The most recently saved conversation, or `null`.
pub async fn conversation(
    State(state): State<AppState>,
    PathParams(idea_id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<Option<Conversation>>>> {
    let conversation = ConversationRepo::latest_for_idea(&state.pool, idea_id).await?;
    Ok(Json(ApiResponse::ok(conversation)))
}
