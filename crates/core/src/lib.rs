//! Domain logic for the idea garden backend.
//!
//! Everything in this crate is pure: no database, no network. The db,
//! ai and api crates build on these types and functions.

pub mod action_plan;
pub mod chat;
pub mod diff;
pub mod error;
pub mod export;
pub mod idea;
pub mod prompt;
pub mod similarity;
pub mod sse;
pub mod stats;
pub mod template;
pub mod types;
pub mod validation;
