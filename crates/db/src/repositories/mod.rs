//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` (or an open connection) as the first argument.

pub mod action_plan_repo;
pub mod conversation_repo;
pub mod document_repo;
pub mod document_version_repo;
pub mod embedding_repo;
pub mod idea_repo;
pub mod stats_repo;
pub mod tag_repo;

pub use action_plan_repo::ActionPlanRepo;
pub use conversation_repo::ConversationRepo;
pub use document_repo::DocumentRepo;
pub use document_version_repo::DocumentVersionRepo;
pub use embedding_repo::EmbeddingRepo;
pub use idea_repo::IdeaRepo;
pub use stats_repo::StatsRepo;
pub use tag_repo::TagRepo;
