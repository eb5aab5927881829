//! Repository for the `comments` table.
//!
//! Replies are fetched level by level (`parent_comment_id = ANY(...)`)
//! up to the caller's depth, rather than a hardcoded stack of nested
//! includes. Deleting a comment cascades to its replies in the schema.

use atelier_core::audit::entity_types;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::Comment;

/// Column list for comments queries.
const COLUMNS: &str = "\
    id, content, author_id, production_item_id, sample_item_id, request_id, \
    parent_comment_id, created_at, updated_at";

/// Map an auditable entity-type tag to the comment attachment column.
///
/// Only the three commentable entities resolve; anything else is `None`.
pub fn entity_column(entity_type: &str) -> Option<&'static str> {
    match entity_type {
        entity_types::PRODUCTION_ITEM => Some("production_item_id"),
        entity_types::SAMPLE_ITEM => Some("sample_item_id"),
        entity_types::SAMPLE_REQUEST => Some("request_id"),
        _ => None,
    }
}

/// Provides CRUD and thread-fetch operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment row. The attachment columns are resolved by the
    /// handler (from the tagged target, or copied from the parent for a
    /// reply) before this is called.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        content: &str,
        author_id: DbId,
        production_item_id: Option<DbId>,
        sample_item_id: Option<DbId>,
        request_id: Option<DbId>,
        parent_comment_id: Option<DbId>,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments
                (content, author_id, production_item_id, sample_item_id, request_id, parent_comment_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(content)
            .bind(author_id)
            .bind(production_item_id)
            .bind(sample_item_id)
            .bind(request_id)
            .bind(parent_comment_id)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Top-level comments (no parent) for one entity, oldest first.
    pub async fn list_top_level(
        pool: &PgPool,
        entity_col: &'static str,
        entity_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE {entity_col} = $1 AND parent_comment_id IS NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Direct replies to any of the given parents, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        parent_ids: &[DbId],
    ) -> Result<Vec<Comment>, sqlx::Error> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE parent_comment_id = ANY($1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(parent_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace a comment's content in place, returning the updated row.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET content = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a comment. Replies go with it (schema cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
