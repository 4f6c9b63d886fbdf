//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! `stats` holds read-only aggregate rows.

pub mod action_plan;
pub mod conversation;
pub mod document;
pub mod document_version;
pub mod embedding;
pub mod idea;
pub mod stats;
pub mod tag;
