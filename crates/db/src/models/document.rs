//! Document entity model and DTOs.

use idea_garden_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Where a document came from. Stored as text in `documents.document_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    Uploaded,
    AiGenerated,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::AiGenerated => "ai_generated",
        }
    }
}

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub idea_id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub document_type: String,
    pub conversation_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new document. The idea id comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDocument {
    #[serde(default)]
    pub title: String,
    pub content: Option<String>,
    /// Defaults to `uploaded` if omitted.
    pub document_type: Option<DocumentType>,
    pub conversation_id: Option<String>,
}

/// DTO for updating an existing document. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateDocument {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
