//! Repository for the `documents` table.
//!
//! Documents are always addressed through their idea: every lookup takes
//! both ids so a document cannot be reached under the wrong idea.

use idea_garden_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::document::{CreateDocument, Document, DocumentType, UpdateDocument};
use crate::models::document_version::VersionAuthor;
use crate::repositories::DocumentVersionRepo;
use crate::NOW;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, idea_id, title, content, document_type, conversation_id, \
    created_at, updated_at";

/// Provides CRUD operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a document without recording any revision.
    pub async fn create(
        pool: &SqlitePool,
        idea_id: DbId,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (idea_id, title, content, document_type, conversation_id) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(idea_id)
            .bind(input.title.trim())
            .bind(&input.content)
            .bind(input.document_type.unwrap_or_default().as_str())
            .bind(&input.conversation_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a document and, when it has content, its version 1, in one
    /// transaction.
    pub async fn create_with_initial_version(
        pool: &SqlitePool,
        idea_id: DbId,
        input: &CreateDocument,
        author: VersionAuthor,
    ) -> Result<Document, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO documents (idea_id, title, content, document_type, conversation_id) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING {COLUMNS}"
        );
        let document = sqlx::query_as::<_, Document>(&query)
            .bind(idea_id)
            .bind(input.title.trim())
            .bind(&input.content)
            .bind(input.document_type.unwrap_or(DocumentType::Uploaded).as_str())
            .bind(&input.conversation_id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(content) = input.content.as_deref().filter(|c| !c.is_empty()) {
            DocumentVersionRepo::create(&mut *tx, document.id, content, author).await?;
        }

        tx.commit().await?;
        Ok(document)
    }

    /// Find a document under its idea.
    pub async fn find(
        pool: &SqlitePool,
        idea_id: DbId,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = ?1 AND idea_id = ?2");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(idea_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a document by id alone, for the version routes.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = ?1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All documents of an idea, newest first.
    pub async fn list_for_idea(
        pool: &SqlitePool,
        idea_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE idea_id = ?1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(idea_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. A content change records a new revision
    /// authored by the user. Returns `None` if the document does not exist
    /// under `idea_id`.
    pub async fn update(
        pool: &SqlitePool,
        idea_id: DbId,
        id: DbId,
        input: &UpdateDocument,
    ) -> Result<Option<Document>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<Option<String>> =
            sqlx::query_scalar("SELECT content FROM documents WHERE id = ?1 AND idea_id = ?2")
                .bind(id)
                .bind(idea_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous) = previous else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE documents SET \
                 title = COALESCE(?3, title), \
                 content = COALESCE(?4, content), \
                 updated_at = {NOW} \
             WHERE id = ?1 AND idea_id = ?2 \
             RETURNING {COLUMNS}"
        );
        let document = sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(idea_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.content)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(content) = &input.content {
            if previous.as_ref() != Some(content) {
                DocumentVersionRepo::create(&mut *tx, id, content, VersionAuthor::User).await?;
            }
        }

        tx.commit().await?;
        Ok(Some(document))
    }

    /// Delete a document and its revisions. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &SqlitePool, idea_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?1 AND idea_id = ?2")
            .bind(id)
            .bind(idea_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
