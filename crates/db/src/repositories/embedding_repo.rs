//! Repository for the `embeddings` table.

use idea_garden_core::types::DbId;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::embedding::{EmbeddingCandidate, StoredEmbedding};
use crate::NOW;

/// Stores one vector per idea, overwritten wholesale.
pub struct EmbeddingRepo;

impl EmbeddingRepo {
    /// Insert or replace the vector of an idea.
    pub async fn upsert(pool: &SqlitePool, idea_id: DbId, vector: &[f32]) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT OR REPLACE INTO embeddings (idea_id, embedding, updated_at) \
             VALUES (?1, ?2, {NOW})"
        );
        sqlx::query(&query)
            .bind(idea_id)
            .bind(Json(vector))
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn find_for_idea(
        pool: &SqlitePool,
        idea_id: DbId,
    ) -> Result<Option<StoredEmbedding>, sqlx::Error> {
        sqlx::query_as::<_, StoredEmbedding>(
            "SELECT idea_id, embedding, updated_at FROM embeddings WHERE idea_id = ?1",
        )
        .bind(idea_id)
        .fetch_optional(pool)
        .await
    }

    /// Every stored vector except the one of `exclude_idea_id`, joined with
    /// the idea fields shown in a related list. Ordered by idea id so ties
    /// rank deterministically.
    pub async fn list_candidates(
        pool: &SqlitePool,
        exclude_idea_id: DbId,
    ) -> Result<Vec<EmbeddingCandidate>, sqlx::Error> {
        sqlx::query_as::<_, EmbeddingCandidate>(
            "SELECT e.idea_id, i.title, i.description, i.category, i.status, e.embedding \
             FROM embeddings e JOIN ideas i ON i.id = e.idea_id \
             WHERE e.idea_id <> ?1 \
             ORDER BY e.idea_id",
        )
        .bind(exclude_idea_id)
        .fetch_all(pool)
        .await
    }
}
