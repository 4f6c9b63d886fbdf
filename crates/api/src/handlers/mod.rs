pub mod action_plans;
pub mod chat;
pub mod documents;
pub mod embeddings;
pub mod export;
pub mod ideas;
pub mod stats;
pub mod versions;
