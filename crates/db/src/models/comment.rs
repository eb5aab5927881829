//! Comment models and DTOs.
//!
//! A comment row carries at most one entity attachment column plus an
//! optional parent pointer; replies inherit the entity attachment of
//! their parent at creation time.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub production_item_id: Option<DbId>,
    pub sample_item_id: Option<DbId>,
    pub request_id: Option<DbId>,
    pub parent_comment_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment. Exactly one of the four attachment fields
/// must be set; the author comes from the actor context, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
    pub production_item_id: Option<DbId>,
    pub sample_item_id: Option<DbId>,
    pub request_id: Option<DbId>,
    pub parent_comment_id: Option<DbId>,
}

/// DTO for replacing a comment's content. No edit history is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}

/// A comment with its replies nested to the fetch depth.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentThread>,
}
