//! Repository for the `ideas` table.

use idea_garden_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::idea::{CreateIdea, Idea, IdeaFilter, IdeaRow, ImportSummary, UpdateIdea};
use crate::repositories::TagRepo;
use crate::NOW;

/// Select list producing an [`IdeaRow`]; tag names are aggregated with
/// the unit separator (`char(31)`).
const SELECT_IDEA: &str = "\
    SELECT i.id, i.title, i.description, i.content, i.category, i.status, \
           i.created_at, i.updated_at, \
           (SELECT GROUP_CONCAT(t.name, char(31)) \
              FROM idea_tags it JOIN tags t ON t.id = it.tag_id \
             WHERE it.idea_id = i.id) AS tag_list \
    FROM ideas i";

/// Provides CRUD and filtering for ideas.
pub struct IdeaRepo;

impl IdeaRepo {
    /// Insert a new idea with its tags, returning the stored row.
    pub async fn create(pool: &SqlitePool, input: &CreateIdea) -> Result<Idea, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let id = Self::insert(&mut *tx, input).await?;
        tx.commit().await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Insert an idea and link its tags on the caller's connection.
    async fn insert(conn: &mut SqliteConnection, input: &CreateIdea) -> Result<DbId, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO ideas (title, description, content, category, status) \
             VALUES (?1, ?2, ?3, ?4, COALESCE(?5, 'seedling')) \
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(&input.content)
        .bind(&input.category)
        .bind(input.status.map(|s| s.as_str()))
        .fetch_one(&mut *conn)
        .await?;

        if let Some(tags) = &input.tags {
            TagRepo::replace_for_idea(&mut *conn, id, tags).await?;
        }
        Ok(id)
    }

    /// Import a batch of ideas in one transaction.
    ///
    /// Items with a blank title, or whose trimmed title matches an existing
    /// idea (including one imported earlier in the same batch), are skipped
    /// and reported in [`ImportSummary::errors`].
    pub async fn import(
        pool: &SqlitePool,
        items: &[CreateIdea],
    ) -> Result<ImportSummary, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut summary = ImportSummary {
            total_attempted: items.len(),
            ..Default::default()
        };

        for item in items {
            let title = item.title.trim();
            if title.is_empty() {
                summary.errors.push("Skipped idea without a title".to_string());
                continue;
            }
            let duplicate: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM ideas WHERE title = ?1)")
                    .bind(title)
                    .fetch_one(&mut *tx)
                    .await?;
            if duplicate {
                summary.errors.push(format!("Duplicate idea: {title}"));
                continue;
            }

            Self::insert(&mut *tx, item).await?;
            summary.imported_count += 1;
        }

        tx.commit().await?;
        Ok(summary)
    }

    /// Find an idea by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!("{SELECT_IDEA} WHERE i.id = ?1");
        let row = sqlx::query_as::<_, IdeaRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Idea::from))
    }

    /// Check whether an idea exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM ideas WHERE id = ?1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List ideas matching `filter`, most recently updated first.
    pub async fn list(pool: &SqlitePool, filter: &IdeaFilter) -> Result<Vec<Idea>, sqlx::Error> {
        let q = filter
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());
        let tags = if filter.tags.is_empty() {
            None
        } else {
            Some(serde_json::Value::from(filter.tags.clone()).to_string())
        };

        let query = format!(
            "{SELECT_IDEA} \
             WHERE (?1 IS NULL \
                    OR i.title LIKE '%' || ?1 || '%' \
                    OR i.description LIKE '%' || ?1 || '%' \
                    OR i.content LIKE '%' || ?1 || '%') \
               AND (?2 IS NULL OR i.category = ?2) \
               AND (?3 IS NULL OR i.status = ?3) \
               AND (?4 IS NULL OR EXISTS ( \
                    SELECT 1 FROM idea_tags it JOIN tags t ON t.id = it.tag_id \
                     WHERE it.idea_id = i.id \
                       AND t.name IN (SELECT value FROM json_each(?4)))) \
             ORDER BY i.updated_at DESC, i.id DESC"
        );
        let rows = sqlx::query_as::<_, IdeaRow>(&query)
            .bind(q)
            .bind(filter.category.as_deref())
            .bind(filter.status.map(|s| s.as_str()))
            .bind(tags)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Idea::from).collect())
    }

    /// Apply a partial update. Returns `None` if no idea with the given id
    /// exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateIdea,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE ideas SET \
                 title = COALESCE(?2, title), \
                 description = COALESCE(?3, description), \
                 content = COALESCE(?4, content), \
                 category = COALESCE(?5, category), \
                 status = COALESCE(?6, status), \
                 updated_at = {NOW} \
             WHERE id = ?1 \
             RETURNING id"
        );
        let updated: Option<DbId> = sqlx::query_scalar(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(&mut *tx)
            .await?;

        if updated.is_none() {
            return Ok(None);
        }
        if let Some(tags) = &input.tags {
            TagRepo::replace_for_idea(&mut *tx, id, tags).await?;
        }
        tx.commit().await?;

        Self::find_by_id(pool, id).await
    }

    /// Delete an idea. Tag links, documents, versions, plans, the embedding
    /// and saved conversations go with it. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct non-empty categories currently in use.
    pub async fn categories(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT category FROM ideas \
             WHERE category IS NOT NULL AND TRIM(category) <> '' \
             ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }
}
