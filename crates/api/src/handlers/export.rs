//! Handlers for exporting ideas (JSON, CSV, markdown) and importing them
//! back from JSON.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use idea_garden_core::error::CoreError;
use idea_garden_core::export::{attachment_header, csv_record, ExportFormat};
use idea_garden_core::types::{DbId, Timestamp};
use idea_garden_db::models::action_plan::ActionPlan;
use idea_garden_db::models::document::Document;
use idea_garden_db::models::idea::{CreateIdea, Idea, ImportSummary};
use idea_garden_db::repositories::{ActionPlanRepo, DocumentRepo, IdeaRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::query::{ExportParams, FormatParams};
use crate::response::ApiResponse;
use crate::state::AppState;

const CSV_HEADER: [&str; 8] = [
    "ID",
    "Title",
    "Description",
    "Category",
    "Status",
    "Created",
    "Updated",
    "Tags",
];

/// JSON body of `GET /api/export/ideas`.
#[derive(Debug, Serialize)]
pub struct IdeasExport {
    pub export_date: Timestamp,
    pub total_ideas: usize,
    pub ideas: Vec<Idea>,
}

/// An idea with everything that hangs off it.
#[derive(Debug, Serialize)]
pub struct FullIdeaExport {
    pub idea: Idea,
    pub documents: Vec<Document>,
    pub action_plans: Vec<ActionPlan>,
}

/// A downloadable text body with its `Content-Disposition`.
fn attachment(format: ExportFormat, disposition: String, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn date(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

fn ideas_csv(ideas: &[Idea]) -> String {
    let mut out = csv_record(CSV_HEADER);
    for idea in ideas {
        out.push_str(&csv_record([
            idea.id.to_string(),
            idea.title.clone(),
            idea.description.clone().unwrap_or_default(),
            idea.category.clone().unwrap_or_default(),
            idea.status.to_string(),
            idea.created_at.to_rfc3339(),
            idea.updated_at.to_rfc3339(),
            idea.tags.join(", "),
        ]));
    }
    out
}

/// The metadata lines shared by both markdown exports.
fn idea_meta(idea: &Idea, tags: &str) -> String {
    format!(
        "**Category:** {}  \n**Status:** {}  \n**Created:** {}  \n**Tags:** {}  \n\n",
        idea.category.as_deref().unwrap_or("uncategorized"),
        idea.status,
        date(&idea.created_at),
        tags,
    )
}

fn ideas_markdown(ideas: &[Idea], now: Timestamp) -> String {
    let mut out = format!(
        "# Ideas Export\n\n*Generated on {}*\n\nTotal Ideas: {}\n\n",
        now.format("%Y-%m-%d %H:%M:%S"),
        ideas.len()
    );
    for idea in ideas {
        let tags = idea
            .tags
            .iter()
            .map(|t| format!("`{t}`"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("## {}\n\n", idea.title));
        out.push_str(&idea_meta(idea, &tags));
        if let Some(description) = idea.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("{description}\n\n"));
        }
        if let Some(content) = idea.content.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(&format!("### Content\n\n{content}\n\n"));
        }
        out.push_str("---\n\n");
    }
    out
}

fn full_idea_markdown(export: &FullIdeaExport) -> String {
    let idea = &export.idea;
    let mut out = format!("# {}\n\n", idea.title);
    out.push_str(&idea_meta(idea, &idea.tags.join(", ")));

    if let Some(description) = idea.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("## Description\n\n{description}\n\n"));
    }
    if let Some(content) = idea.content.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(&format!("## Content\n\n{content}\n\n"));
    }

    if !export.documents.is_empty() {
        out.push_str("## Documents\n\n");
        for doc in &export.documents {
            out.push_str(&format!(
                "### {}\n\n*Type: {}*\n\n{}\n\n",
                doc.title,
                doc.document_type,
                doc.content.as_deref().unwrap_or_default()
            ));
        }
    }

    if !export.action_plans.is_empty() {
        out.push_str("## Action Plans\n\n");
        for plan in &export.action_plans {
            out.push_str(&format!(
                "### {}\n\n**Timeline:** {}  \n**Priority:** {}  \n**Vision:** {}  \n\
                 **Resources:** {}  \n**Constraints:** {}  \n\n{}\n\n",
                plan.title,
                plan.timeline,
                plan.priority,
                plan.vision,
                plan.resources,
                plan.constraints,
                plan.content
            ));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/export/ideas?format=json|csv|markdown&category=&status=&tags=
pub async fn export_ideas(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ExportParams>,
) -> AppResult<Response> {
    let format = params.format()?;
    let filter = params.into_filter()?;
    let ideas = IdeaRepo::list(&state.pool, &filter).await?;
    let now = Utc::now();
    tracing::info!(format = format.extension(), count = ideas.len(), "Exporting ideas");

    let disposition = attachment_header("ideas_export", format, now);
    Ok(match format {
        ExportFormat::Json => Json(ApiResponse::ok(IdeasExport {
            export_date: now,
            total_ideas: ideas.len(),
            ideas,
        }))
        .into_response(),
        ExportFormat::Csv => attachment(format, disposition, ideas_csv(&ideas)),
        ExportFormat::Markdown => attachment(format, disposition, ideas_markdown(&ideas, now)),
    })
}

/// GET /api/export/idea/{id}/full?format=json|markdown
pub async fn export_full_idea(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
    QueryParams(params): QueryParams<FormatParams>,
) -> AppResult<Response> {
    let format = params.format()?;
    if format == ExportFormat::Csv {
        return Err(AppError::BadRequest("Unsupported format".to_string()));
    }

    let idea = IdeaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Idea", id }))?;
    let export = FullIdeaExport {
        idea,
        documents: DocumentRepo::list_for_idea(&state.pool, id).await?,
        action_plans: ActionPlanRepo::list_for_idea(&state.pool, id).await?,
    };
    tracing::info!(
        idea_id = id,
        documents = export.documents.len(),
        action_plans = export.action_plans.len(),
        "Exporting idea"
    );

    Ok(match format {
        ExportFormat::Markdown => {
            let disposition = attachment_header(&format!("idea_{id}"), format, Utc::now());
            attachment(format, disposition, full_idea_markdown(&export))
        }
        _ => Json(ApiResponse::ok(export)).into_response(),
    })
}

/// POST /api/export/import/ideas
///
/// Takes a JSON array of ideas. Duplicates (by title) and untitled items
/// are skipped and listed in `errors`; the rest are created together.
pub async fn import_ideas(
    State(state): State<AppState>,
    JsonBody(items): JsonBody<Vec<CreateIdea>>,
) -> AppResult<Json<ApiResponse<ImportSummary>>> {
    let summary = IdeaRepo::import(&state.pool, &items).await?;
    tracing::info!(
        imported = summary.imported_count,
        attempted = summary.total_attempted,
        skipped = summary.errors.len(),
        "Ideas imported"
    );

    let message = format!("Successfully imported {} ideas", summary.imported_count);
    Ok(Json(ApiResponse::ok(summary).with_message(message)))
}
