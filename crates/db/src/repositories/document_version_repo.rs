//! Repository for the `document_versions` table.

use idea_garden_core::types::DbId;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::document_version::{DocumentVersion, VersionAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document_id, version_number, content, created_by, created_at";

/// Provides version-management operations for document revisions.
pub struct DocumentVersionRepo;

impl DocumentVersionRepo {
    /// Insert a new revision, auto-assigning the next version number.
    ///
    /// The number is computed inside the INSERT and guarded by the
    /// `(document_id, version_number)` unique index, so two writers can
    /// never record the same number. Accepts a pool or an open
    /// transaction.
    pub async fn create<'e, E>(
        executor: E,
        document_id: DbId,
        content: &str,
        created_by: VersionAuthor,
    ) -> Result<DocumentVersion, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO document_versions (document_id, version_number, content, created_by) \
             VALUES ( \
                ?1, \
                (SELECT COALESCE(MAX(version_number), 0) + 1 FROM document_versions WHERE document_id = ?1), \
                ?2, ?3 \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentVersion>(&query)
            .bind(document_id)
            .bind(content)
            .bind(created_by.as_str())
            .fetch_one(executor)
            .await
    }

    /// All revisions of a document, newest first.
    pub async fn list_for_document(
        pool: &SqlitePool,
        document_id: DbId,
    ) -> Result<Vec<DocumentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM document_versions \
             WHERE document_id = ?1 \
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, DocumentVersion>(&query)
            .bind(document_id)
            .fetch_all(pool)
            .await
    }

    /// Find one revision by its number.
    pub async fn find_by_number(
        pool: &SqlitePool,
        document_id: DbId,
        version_number: i64,
    ) -> Result<Option<DocumentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM document_versions \
             WHERE document_id = ?1 AND version_number = ?2"
        );
        sqlx::query_as::<_, DocumentVersion>(&query)
            .bind(document_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }

    /// The highest-numbered revision, if any.
    pub async fn latest(
        pool: &SqlitePool,
        document_id: DbId,
    ) -> Result<Option<DocumentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM document_versions \
             WHERE document_id = ?1 \
             ORDER BY version_number DESC LIMIT 1"
        );
        sqlx::query_as::<_, DocumentVersion>(&query)
            .bind(document_id)
            .fetch_optional(pool)
            .await
    }
}
