//! Repository for the `conversations` table.

use idea_garden_core::types::DbId;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::conversation::{Conversation, SaveConversation};
use crate::NOW;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, idea_id, messages, generated_document, created_at, updated_at";

pub struct ConversationRepo;

impl ConversationRepo {
    /// Insert a conversation snapshot, replacing one with the same id.
    pub async fn save(
        pool: &SqlitePool,
        input: &SaveConversation,
    ) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversations (id, idea_id, messages, generated_document) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT (id) DO UPDATE SET \
                 messages = excluded.messages, \
                 generated_document = excluded.generated_document, \
                 updated_at = {NOW} \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(&input.id)
            .bind(input.idea_id)
            .bind(Json(&input.messages))
            .bind(&input.generated_document)
            .fetch_one(pool)
            .await
    }

    /// The most recently saved conversation of an idea.
    pub async fn latest_for_idea(
        pool: &SqlitePool,
        idea_id: DbId,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversations \
             WHERE idea_id = ?1 \
             ORDER BY updated_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(idea_id)
            .fetch_optional(pool)
            .await
    }
}
