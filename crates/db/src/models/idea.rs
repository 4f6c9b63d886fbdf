//! Idea entity model and DTOs.

use idea_garden_core::idea::IdeaStatus;
use idea_garden_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Separator used when tag names are aggregated into one column.
pub(crate) const TAG_SEPARATOR: char = '\u{1f}';

/// An idea row as selected, with its tag names aggregated into one column.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct IdeaRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub tag_list: Option<String>,
}

/// An idea together with its tag names, sorted.
#[derive(Debug, Clone, Serialize)]
pub struct Idea {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: IdeaStatus,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<IdeaRow> for Idea {
    fn from(row: IdeaRow) -> Self {
        let mut tags: Vec<String> = row
            .tag_list
            .as_deref()
            .map(|list| {
                list.split(TAG_SEPARATOR)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        tags.sort();

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            category: row.category,
            // The CHECK constraint keeps stored values valid.
            status: row.status.parse().unwrap_or_default(),
            tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new idea.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIdea {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    /// Defaults to `seedling` if omitted.
    pub status: Option<IdeaStatus>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing idea. All fields are optional.
///
/// A present `tags` list replaces the whole tag set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIdea {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: Option<IdeaStatus>,
    pub tags: Option<Vec<String>>,
}

/// Filters accepted by the idea listing.
#[derive(Debug, Clone, Default)]
pub struct IdeaFilter {
    /// Substring matched against title, description and content.
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<IdeaStatus>,
    /// The idea must carry at least one of these tags.
    pub tags: Vec<String>,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported_count: usize,
    pub total_attempted: usize,
    /// One line per skipped item.
    pub errors: Vec<String>,
}
