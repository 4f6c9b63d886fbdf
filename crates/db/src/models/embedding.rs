//! Stored idea embeddings.

use idea_garden_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `embeddings` table.
#[derive(Debug, Clone, FromRow)]
pub struct StoredEmbedding {
    pub idea_id: DbId,
    pub embedding: Json<Vec<f32>>,
    pub updated_at: Timestamp,
}

/// Another idea's vector joined with the fields shown in a related list.
#[derive(Debug, Clone, FromRow)]
pub struct EmbeddingCandidate {
    pub idea_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: String,
    pub embedding: Json<Vec<f32>>,
}

/// One entry of a related-ideas response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedIdea {
    pub idea_id: DbId,
    pub similarity: f64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: String,
}

impl RelatedIdea {
    pub fn new(candidate: EmbeddingCandidate, similarity: f64) -> Self {
        Self {
            idea_id: candidate.idea_id,
            similarity,
            title: candidate.title,
            description: candidate.description,
            category: candidate.category,
            status: candidate.status,
        }
    }
}
