//! Action plan entity model and DTOs.

use idea_garden_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `action_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionPlan {
    pub id: DbId,
    pub idea_id: DbId,
    pub title: String,
    pub content: String,
    pub timeline: String,
    pub vision: String,
    pub resources: String,
    pub constraints: String,
    pub priority: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new action plan. The idea id comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateActionPlan {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub timeline: Option<String>,
    pub vision: Option<String>,
    pub resources: Option<String>,
    pub constraints: Option<String>,
    /// Defaults to 5 if omitted.
    pub priority: Option<i64>,
}

/// DTO for updating an existing action plan. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActionPlan {
    pub title: Option<String>,
    pub content: Option<String>,
    pub timeline: Option<String>,
    pub vision: Option<String>,
    pub resources: Option<String>,
    pub constraints: Option<String>,
    pub priority: Option<i64>,
}

impl UpdateActionPlan {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.timeline.is_none()
            && self.vision.is_none()
            && self.resources.is_none()
            && self.constraints.is_none()
            && self.priority.is_none()
    }
}
