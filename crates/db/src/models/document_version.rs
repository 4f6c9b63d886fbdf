//! Document version model and DTOs.

use idea_garden_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Who wrote a revision. Stored as text in `document_versions.created_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionAuthor {
    #[default]
    User,
    Ai,
}

impl VersionAuthor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

/// A row from the `document_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentVersion {
    pub id: DbId,
    pub document_id: DbId,
    pub version_number: i64,
    pub content: String,
    pub created_by: String,
    pub created_at: Timestamp,
}

/// DTO for recording a revision explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentVersion {
    pub content: String,
    /// Defaults to `user` if omitted.
    pub created_by: Option<VersionAuthor>,
}
