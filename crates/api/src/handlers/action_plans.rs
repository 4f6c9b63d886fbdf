//! Handlers for action plans, scoped to an idea.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use idea_garden_ai::chat::PlanSource;
use idea_garden_core::action_plan::{plan_title, ActionPlanGoals};
use idea_garden_core::chat::{DocumentContext, IdeaContext};
use idea_garden_core::error::CoreError;
use idea_garden_core::types::DbId;
use idea_garden_core::validation::{reject_blank_if_present, require_non_blank, validate_priority};
use idea_garden_db::models::action_plan::{ActionPlan, CreateActionPlan, UpdateActionPlan};
use idea_garden_db::repositories::{ActionPlanRepo, DocumentRepo, IdeaRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParams};
use crate::handlers::documents::ensure_idea_exists;
use crate::response::ApiResponse;
use crate::state::AppState;

fn plan_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Action plan",
        id,
    })
}

/// GET /api/ideas/{id}/action-plan
///
/// The most recent plan, or `null` when the idea has none.
pub async fn current(
    State(state): State<AppState>,
    PathParams(idea_id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<Option<ActionPlan>>>> {
    ensure_idea_exists(&state, idea_id).await?;
    let plan = ActionPlanRepo::current_for_idea(&state.pool, idea_id).await?;
    Ok(Json(ApiResponse::ok(plan)))
}

/// GET /api/ideas/{id}/action-plans
pub async fn list(
    State(state): State<AppState>,
    PathParams(idea_id): PathParams<DbId>,
) -> AppResult<Json<ApiResponse<Vec<ActionPlan>>>> {
    ensure_idea_exists(&state, idea_id).await?;
    let plans = ActionPlanRepo::list_for_idea(&state.pool, idea_id).await?;
    Ok(Json(ApiResponse::ok(plans)))
}

/// GET /api/ideas/{id}/action-plans/{plan_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParams((idea_id, id)): PathParams<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<ActionPlan>>> {
    let plan = ActionPlanRepo::find(&state.pool, idea_id, id)
        .await?
        .ok_or_else(|| plan_not_found(id))?;
    Ok(Json(ApiResponse::ok(plan)))
}

/// POST /api/ideas/{id}/action-plans
pub async fn create(
    State(state): State<AppState>,
    PathParams(idea_id): PathParams<DbId>,
    JsonBody(input): JsonBody<CreateActionPlan>,
) -> AppResult<(StatusCode, Json<ApiResponse<ActionPlan>>)> {
    require_non_blank(Some(input.title.as_str()), "Title is required")?;
    require_non_blank(Some(input.content.as_str()), "Content is required")?;
    if let Some(priority) = input.priority {
        validate_priority(priority)?;
    }
    ensure_idea_exists(&state, idea_id).await?;

    let plan = ActionPlanRepo::create(&state.pool, idea_id, &input).await?;
    tracing::info!(idea_id, plan_id = plan.id, "Action plan created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(plan).with_message("Action plan created successfully")),
    ))
}

/// POST /api/ideas/{id}/action-plans/generate
///
/// Asks the model for a checklist; without one, a phased plan is built
/// locally. Either way the result is stored as a new plan.
pub async fn generate(
    State(state): State<AppState>,
    PathParams(idea_id): PathParams<DbId>,
    JsonBody(goals): JsonBody<ActionPlanGoals>,
) -> AppResult<(StatusCode, Json<ApiResponse<ActionPlan>>)> {
    goals.validate()?;

    let idea = IdeaRepo::find_by_id(&state.pool, idea_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Idea",
            id: idea_id,
        }))?;
    let documents: Vec<DocumentContext> = DocumentRepo::list_for_idea(&state.pool, idea_id)
        .await?
        .into_iter()
        .map(|d| DocumentContext {
            title: d.title,
            content: d.content,
        })
        .collect();
    let context = IdeaContext {
        title: idea.title.clone(),
        description: idea.description.clone(),
        category: idea.category.clone(),
        content: idea.content.clone(),
    };

    let (content, source) = state
        .chat
        .generate_action_plan(&context, &documents, &goals)
        .await;

    let input = CreateActionPlan {
        title: plan_title(&idea.title),
        content,
        timeline: Some(goals.timeline.clone()),
        vision: Some(goals.vision.clone()),
        resources: goals.resources.clone(),
        constraints: goals.constraints.clone(),
        priority: Some(goals.priority()),
    };
    let plan = ActionPlanRepo::create(&state.pool, idea_id, &input).await?;
    tracing::info!(idea_id, plan_id = plan.id, ?source, "Action plan generated");

    let message = match source {
        PlanSource::Model => "Action plan generated successfully",
        PlanSource::Fallback => "Action plan generated from the built-in template",
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(plan).with_message(message)),
    ))
}

/// PUT /api/ideas/{id}/action-plans/{plan_id}
pub async fn update(
    State(state): State<AppState>,
    PathParams((idea_id, id)): PathParams<(DbId, DbId)>,
    JsonBody(input): JsonBody<UpdateActionPlan>,
) -> AppResult<Json<ApiResponse<ActionPlan>>> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    reject_blank_if_present(input.title.as_deref(), "Title cannot be empty")?;
    if let Some(priority) = input.priority {
        validate_priority(priority)?;
    }

    let plan = ActionPlanRepo::update(&state.pool, idea_id, id, &input)
        .await?
        .ok_or_else(|| plan_not_found(id))?;
    tracing::info!(idea_id, plan_id = id, "Action plan updated");

    Ok(Json(
        ApiResponse::ok(plan).with_message("Action plan updated successfully"),
    ))
}

/// DELETE /api/ideas/{id}/action-plans/{plan_id}
pub async fn delete(
    State(state): State<AppState>,
    PathParams((idea_id, id)): PathParams<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !ActionPlanRepo::delete(&state.pool, idea_id, id).await? {
        return Err(plan_not_found(id));
    }
    tracing::info!(idea_id, plan_id = id, "Action plan deleted");
    Ok(Json(ApiResponse::message("Action plan deleted successfully")))
}
