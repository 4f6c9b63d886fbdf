//! Language-model integration for the idea garden.
//!
//! [`AiProvider`](provider::AiProvider) is the seam: the OpenAI client in
//! [`openai`] implements it for production, tests substitute a fake. The
//! services on top ([`embeddings::EmbeddingService`],
//! [`chat::ChatService`]) degrade quietly when no provider is configured.

pub mod chat;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod openai;
pub mod provider;
pub mod stream;

pub use config::AiConfig;
pub use error::AiError;
pub use provider::{AiProvider, CompletionOptions, TokenStream};
