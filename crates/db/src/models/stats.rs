//! Aggregate rows for usage statistics.

use serde::Serialize;
use sqlx::FromRow;

/// Row counts across the main tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct Totals {
    pub total_ideas: i64,
    pub total_documents: i64,
    pub total_action_plans: i64,
}

/// Ideas per category. Uncategorised ideas report `null`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: i64,
}

/// Ideas per growth status.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
