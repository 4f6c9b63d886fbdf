//! Embedding generation, storage and related-idea ranking.

use std::sync::Arc;

use idea_garden_core::idea::embedding_text;
use idea_garden_core::similarity::rank_by_similarity;
use idea_garden_core::types::DbId;
use idea_garden_db::models::embedding::RelatedIdea;
use idea_garden_db::models::idea::{Idea, IdeaFilter};
use idea_garden_db::repositories::{EmbeddingRepo, IdeaRepo};
use idea_garden_db::DbPool;
use serde::Serialize;

use crate::error::AiError;
use crate::provider::AiProvider;

/// Outcome of a bulk regeneration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub total: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Embeds ideas and ranks them by cosine similarity.
///
/// Without a provider every operation is a no-op that reports nothing.
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Option<Arc<dyn AiProvider>>,
}

impl EmbeddingService {
    pub fn new(provider: Option<Arc<dyn AiProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Embed arbitrary text.
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>, AiError> {
        let provider = self.provider.as_ref().ok_or(AiError::NotConfigured)?;
        if text.trim().is_empty() {
            return Err(AiError::EmptyInput);
        }
        provider.embed(text).await
    }

    /// Embed an idea's title, description and content and store the vector.
    pub async fn store_for_idea(&self, pool: &DbPool, idea: &Idea) -> Result<(), AiError> {
        let text = embedding_text(&idea.title, idea.description.as_deref(), idea.content.as_deref())
            .ok_or(AiError::EmptyInput)?;
        let vector = self.generate(&text).await?;
        EmbeddingRepo::upsert(pool, idea.id, &vector).await?;
        tracing::debug!(idea_id = idea.id, dimensions = vector.len(), "Stored idea embedding");
        Ok(())
    }

    /// Best-effort refresh after an idea changed. Failures are logged only.
    pub async fn refresh_idea(&self, pool: &DbPool, idea: &Idea) {
        if !self.is_enabled() {
            return;
        }
        if let Err(e) = self.store_for_idea(pool, idea).await {
            tracing::warn!(idea_id = idea.id, error = %e, "Failed to refresh idea embedding");
        }
    }

    /// The ideas most similar to `idea_id`, best first.
    ///
    /// Returns an empty list when the target has no stored vector or no
    /// provider is configured. Candidates whose vector has a different
    /// dimension are skipped.
    pub async fn find_related(
        &self,
        pool: &DbPool,
        idea_id: DbId,
        limit: usize,
    ) -> Result<Vec<RelatedIdea>, AiError> {
        if !self.is_enabled() {
            return Ok(Vec::new());
        }
        let Some(target) = EmbeddingRepo::find_for_idea(pool, idea_id).await? else {
            return Ok(Vec::new());
        };

        let candidates = EmbeddingRepo::list_candidates(pool, idea_id).await?;
        let ranking = rank_by_similarity(
            &target.embedding.0,
            candidates.into_iter().map(|mut c| {
                let vector = std::mem::take(&mut c.embedding.0);
                (c, vector)
            }),
            limit,
        );

        if ranking.skipped > 0 {
            tracing::warn!(
                idea_id,
                skipped = ranking.skipped,
                "Skipped stored embeddings with a different dimension"
            );
        }

        Ok(ranking
            .ranked
            .into_iter()
            .map(|r| RelatedIdea::new(r.item, r.similarity))
            .collect())
    }

    /// Regenerate the embedding of every idea, continuing past failures.
    pub async fn update_all(&self, pool: &DbPool) -> Result<UpdateSummary, AiError> {
        let ideas = IdeaRepo::list(pool, &IdeaFilter::default()).await?;
        let mut summary = UpdateSummary {
            total: ideas.len(),
            ..Default::default()
        };
        if !self.is_enabled() {
            return Ok(summary);
        }

        for idea in &ideas {
            match self.store_for_idea(pool, idea).await {
                Ok(()) => summary.updated += 1,
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(idea_id = idea.id, error = %e, "Failed to update embedding");
                }
            }
        }

        tracing::info!(
            total = summary.total,
            updated = summary.updated,
            failed = summary.failed,
            "Embedding refresh complete"
        );
        Ok(summary)
    }
}
