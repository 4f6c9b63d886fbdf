//! Read-only aggregates over ideas, documents and action plans.
//!
//! Every `since` bound is inclusive and compared against `created_at`.

use idea_garden_core::types::Timestamp;
use sqlx::SqlitePool;

use crate::models::stats::{CategoryCount, StatusCount, Totals};
use crate::sql_timestamp;

pub struct StatsRepo;

impl StatsRepo {
    /// Row counts of ideas, documents and action plans.
    pub async fn totals(pool: &SqlitePool) -> Result<Totals, sqlx::Error> {
        sqlx::query_as::<_, Totals>(
            "SELECT \
                (SELECT COUNT(*) FROM ideas) AS total_ideas, \
                (SELECT COUNT(*) FROM documents) AS total_documents, \
                (SELECT COUNT(*) FROM action_plans) AS total_action_plans",
        )
        .fetch_one(pool)
        .await
    }

    /// Ideas created at or after `since`, or all ideas when `None`.
    pub async fn ideas_created_since(
        pool: &SqlitePool,
        since: Option<Timestamp>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ideas WHERE (?1 IS NULL OR created_at >= ?1)")
            .bind(since.map(sql_timestamp))
            .fetch_one(pool)
            .await
    }

    /// Idea counts per category, largest first.
    pub async fn category_counts(
        pool: &SqlitePool,
        since: Option<Timestamp>,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count FROM ideas \
             WHERE (?1 IS NULL OR created_at >= ?1) \
             GROUP BY category \
             ORDER BY count DESC, category",
        )
        .bind(since.map(sql_timestamp))
        .fetch_all(pool)
        .await
    }

    /// Idea counts per status, largest first.
    pub async fn status_counts(
        pool: &SqlitePool,
        since: Option<Timestamp>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM ideas \
             WHERE (?1 IS NULL OR created_at >= ?1) \
             GROUP BY status \
             ORDER BY count DESC, status",
        )
        .bind(since.map(sql_timestamp))
        .fetch_all(pool)
        .await
    }

    /// Creation time of the oldest idea.
    pub async fn first_idea_created_at(
        pool: &SqlitePool,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar("SELECT created_at FROM ideas ORDER BY created_at, id LIMIT 1")
            .fetch_optional(pool)
            .await
    }
}
