//! Repository for the `tags` and `idea_tags` tables.

use idea_garden_core::types::DbId;
use idea_garden_core::validation::normalize_tag_names;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::tag::Tag;

pub struct TagRepo;

impl TagRepo {
    /// Every tag, sorted by name.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Replace the tag set of an idea.
    ///
    /// Names are trimmed and de-duplicated; blanks are ignored. Unknown tags
    /// are created on the fly. Runs on the caller's connection so it can
    /// share a transaction with the idea write.
    pub async fn replace_for_idea(
        conn: &mut SqliteConnection,
        idea_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM idea_tags WHERE idea_id = ?1")
            .bind(idea_id)
            .execute(&mut *conn)
            .await?;

        for name in normalize_tag_names(names) {
            sqlx::query("INSERT OR IGNORE INTO tags (name) VALUES (?1)")
                .bind(&name)
                .execute(&mut *conn)
                .await?;
            sqlx::query(
                "INSERT OR IGNORE INTO idea_tags (idea_id, tag_id) \
                 SELECT ?1, id FROM tags WHERE name = ?2",
            )
            .bind(idea_id)
            .bind(&name)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
