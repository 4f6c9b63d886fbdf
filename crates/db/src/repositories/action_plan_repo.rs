//! Repository for the `action_plans` table.

use idea_garden_core::types::DbId;
use idea_garden_core::validation::DEFAULT_PRIORITY;
use sqlx::SqlitePool;

use crate::models::action_plan::{ActionPlan, CreateActionPlan, UpdateActionPlan};
use crate::NOW;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, idea_id, title, content, timeline, vision, resources, constraints, \
    priority, created_at, updated_at";

/// Provides CRUD operations for action plans. Every lookup is scoped to
/// the owning idea.
pub struct ActionPlanRepo;

impl ActionPlanRepo {
    /// Insert a new plan. Free-text fields default to empty, priority to 5.
    pub async fn create(
        pool: &SqlitePool,
        idea_id: DbId,
        input: &CreateActionPlan,
    ) -> Result<ActionPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_plans \
                (idea_id, title, content, timeline, vision, resources, constraints, priority) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(idea_id)
            .bind(input.title.trim())
            .bind(&input.content)
            .bind(input.timeline.as_deref().unwrap_or_default())
            .bind(input.vision.as_deref().unwrap_or_default())
            .bind(input.resources.as_deref().unwrap_or_default())
            .bind(input.constraints.as_deref().unwrap_or_default())
            .bind(input.priority.unwrap_or(DEFAULT_PRIORITY))
            .fetch_one(pool)
            .await
    }

    /// The most recently created plan of an idea.
    pub async fn current_for_idea(
        pool: &SqlitePool,
        idea_id: DbId,
    ) -> Result<Option<ActionPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_plans \
             WHERE idea_id = ?1 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(idea_id)
            .fetch_optional(pool)
            .await
    }

    /// All plans of an idea, newest first.
    pub async fn list_for_idea(
        pool: &SqlitePool,
        idea_id: DbId,
    ) -> Result<Vec<ActionPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_plans \
             WHERE idea_id = ?1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(idea_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &SqlitePool,
        idea_id: DbId,
        id: DbId,
    ) -> Result<Option<ActionPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM action_plans WHERE id = ?1 AND idea_id = ?2");
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(id)
            .bind(idea_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if the plan does not exist
    /// under `idea_id`.
    pub async fn update(
        pool: &SqlitePool,
        idea_id: DbId,
        id: DbId,
        input: &UpdateActionPlan,
    ) -> Result<Option<ActionPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE action_plans SET \
                 title = COALESCE(?3, title), \
                 content = COALESCE(?4, content), \
                 timeline = COALESCE(?5, timeline), \
                 vision = COALESCE(?6, vision), \
                 resources = COALESCE(?7, resources), \
                 constraints = COALESCE(?8, constraints), \
                 priority = COALESCE(?9, priority), \
                 updated_at = {NOW} \
             WHERE id = ?1 AND idea_id = ?2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(id)
            .bind(idea_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.content)
            .bind(&input.timeline)
            .bind(&input.vision)
            .bind(&input.resources)
            .bind(&input.constraints)
            .bind(input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, idea_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM action_plans WHERE id = ?1 AND idea_id = ?2")
            .bind(id)
            .bind(idea_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
