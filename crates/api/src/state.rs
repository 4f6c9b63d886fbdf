use std::sync::Arc;

use idea_garden_ai::chat::ChatService;
use idea_garden_ai::embeddings::EmbeddingService;
use idea_garden_ai::AiProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and services are handles over shared data.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: idea_garden_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Embedding generation and related-idea ranking.
    pub embeddings: EmbeddingService,
    /// Chat, document and action-plan generation.
    pub chat: ChatService,
}

impl AppState {
    /// Wire both services to the same provider. `None` disables AI features.
    pub fn new(
        pool: idea_garden_db::DbPool,
        config: ServerConfig,
        provider: Option<Arc<dyn AiProvider>>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            embeddings: EmbeddingService::new(provider.clone()),
            chat: ChatService::new(provider),
        }
    }
}
