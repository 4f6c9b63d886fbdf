use axum::extract::State;
use axum::Json;
use idea_garden_ai::embeddings::UpdateSummary;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/embeddings/update-all
///
/// Regenerates every idea's embedding. Per-idea failures are counted, not
/// fatal.
pub async fn update_all(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<UpdateSummary>>> {
    let summary = state.embeddings.update_all(&state.pool).await?;
    let message = format!(
        "Updated embeddings for {} of {} ideas",
        summary.updated, summary.total
    );
    Ok(Json(ApiResponse::ok(summary).with_message(message)))
}
