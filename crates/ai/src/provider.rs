//! The provider abstraction used by the services.

use async_trait::async_trait;
use futures::stream::BoxStream;
use idea_garden_core::chat::PromptMessage;

use crate::error::AiError;

/// Token deltas of a streamed completion, in arrival order.
pub type TokenStream = BoxStream<'static, Result<String, AiError>>;

/// Sampling settings for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    /// Live project-overview chat.
    pub const CHAT: Self = Self {
        temperature: 0.7,
        max_tokens: 500,
    };

    /// Full project-overview document.
    pub const DOCUMENT: Self = Self {
        temperature: 0.7,
        max_tokens: 2000,
    };

    /// Action-plan checklist.
    pub const ACTION_PLAN: Self = Self {
        temperature: 0.7,
        max_tokens: 1500,
    };
}

/// A chat-completion and embedding backend.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Embed `text` into a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError>;

    /// Run one completion to the end and return its text.
    async fn complete(
        &self,
        messages: &[PromptMessage],
        options: CompletionOptions,
    ) -> Result<String, AiError>;

    /// Start a streamed completion.
    ///
    /// Errors before the first token (bad credentials, unreachable host)
    /// are returned directly; later failures arrive as stream items.
    /// Dropping the stream abandons the upstream request.
    async fn stream(
        &self,
        messages: &[PromptMessage],
        options: CompletionOptions,
    ) -> Result<TokenStream, AiError>;
}
