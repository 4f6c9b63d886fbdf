//! Saved chat conversations.

use idea_garden_core::chat::ChatMessage;
use idea_garden_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `conversations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub idea_id: DbId,
    pub messages: Json<Vec<ChatMessage>>,
    pub generated_document: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for saving a conversation snapshot.
#[derive(Debug, Clone)]
pub struct SaveConversation {
    pub id: String,
    pub idea_id: DbId,
    pub messages: Vec<ChatMessage>,
    pub generated_document: Option<String>,
}
