//! Handlers for discussion comments.
//!
//! A comment attaches to exactly one of {production item, sample item,
//! request} or replies to another comment, inheriting the parent's entity
//! attachment. Threads are read level by level up to the caller's depth.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use atelier_core::audit::{actions, entity_types};
use atelier_core::comments::{clamp_reply_depth, validate_content, CommentTarget};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::comment::{Comment, CommentThread, CreateComment, UpdateComment};
use atelier_db::repositories::comment_repo::entity_column;
use atelier_db::repositories::{
    CommentRepo, ProductionItemRepo, RequestRepo, SampleItemRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::middleware::actor::ActorUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for fetching an entity's comment thread.
#[derive(Debug, Deserialize)]
pub struct ThreadParams {
    pub entity_type: String,
    pub entity_id: DbId,
    /// Reply nesting depth; defaults to 3, capped at 10.
    pub depth: Option<i64>,
}

// ---------------------------------------------------------------------------
// POST /comments
// ---------------------------------------------------------------------------

/// Create a comment or a reply.
///
/// For a reply the entity attachment is copied from the parent; the
/// caller never needs to know which entity a deep reply belongs to.
pub async fn create_comment(
    State(state): State<AppState>,
    actor: ActorUser,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    validate_content(&input.content)?;

    let target = CommentTarget::resolve(
        input.production_item_id,
        input.sample_item_id,
        input.request_id,
        input.parent_comment_id,
    )?;

    let (production_item_id, sample_item_id, request_id, parent_comment_id) = match target {
        CommentTarget::ProductionItem(id) => {
            if ProductionItemRepo::find_by_id(&state.pool, id).await?.is_none() {
                return Err(referential_error("Production item", id));
            }
            (Some(id), None, None, None)
        }
        CommentTarget::SampleItem(id) => {
            if SampleItemRepo::find_by_id(&state.pool, id).await?.is_none() {
                return Err(referential_error("Sample item", id));
            }
            (None, Some(id), None, None)
        }
        CommentTarget::Request(id) => {
            if RequestRepo::find_by_id(&state.pool, id).await?.is_none() {
                return Err(referential_error("Sample request", id));
            }
            (None, None, Some(id), None)
        }
        CommentTarget::Reply(parent_id) => {
            let parent = CommentRepo::find_by_id(&state.pool, parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::NotFound {
                        entity: "Comment",
                        id: parent_id,
                    })
                })?;
            // Inherit the parent's entity attachment.
            (
                parent.production_item_id,
                parent.sample_item_id,
                parent.request_id,
                Some(parent_id),
            )
        }
    };

    let comment = CommentRepo::create(
        &state.pool,
        &input.content,
        actor.user_id(),
        production_item_id,
        sample_item_id,
        request_id,
        parent_comment_id,
    )
    .await?;

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::COMMENT,
        comment.id,
        actions::CREATED,
        None,
    )
    .await;

    tracing::info!(
        comment_id = comment.id,
        user_id = actor.user_id(),
        "Comment created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

fn referential_error(entity: &str, id: DbId) -> AppError {
    AppError::Core(CoreError::ReferentialIntegrity(format!(
        "{entity} {id} does not exist"
    )))
}

// ---------------------------------------------------------------------------
// GET /comments?entity_type=&entity_id=&depth=
// ---------------------------------------------------------------------------

/// Fetch the comment thread for one entity: top-level comments with
/// replies eagerly nested to the requested depth.
pub async fn get_thread(
    State(state): State<AppState>,
    Query(params): Query<ThreadParams>,
) -> AppResult<impl IntoResponse> {
    let column = entity_column(&params.entity_type).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown commentable entity type '{}'",
            params.entity_type
        )))
    })?;
    let depth = clamp_reply_depth(params.depth);

    let top_level = CommentRepo::list_top_level(&state.pool, column, params.entity_id).await?;

    // Fetch replies level by level down to the requested depth.
    let mut children: HashMap<DbId, Vec<Comment>> = HashMap::new();
    let mut frontier: Vec<DbId> = top_level.iter().map(|c| c.id).collect();
    for _ in 0..depth {
        if frontier.is_empty() {
            break;
        }
        let replies = CommentRepo::list_replies(&state.pool, &frontier).await?;
        frontier = replies.iter().map(|c| c.id).collect();
        for reply in replies {
            if let Some(parent_id) = reply.parent_comment_id {
                children.entry(parent_id).or_default().push(reply);
            }
        }
    }

    let thread: Vec<CommentThread> = top_level
        .into_iter()
        .map(|c| assemble_thread(c, &mut children))
        .collect();

    Ok(Json(DataResponse { data: thread }))
}

/// Attach fetched replies to their parents, recursively.
fn assemble_thread(comment: Comment, children: &mut HashMap<DbId, Vec<Comment>>) -> CommentThread {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|c| assemble_thread(c, children))
        .collect();
    CommentThread { comment, replies }
}

// ---------------------------------------------------------------------------
// PUT /comments/{id}
// ---------------------------------------------------------------------------

/// Replace a comment's content. No edit history is kept.
pub async fn update_comment(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<impl IntoResponse> {
    validate_content(&input.content)?;

    let comment = CommentRepo::update_content(&state.pool, id, &input.content)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id,
            })
        })?;

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::COMMENT,
        id,
        actions::UPDATED,
        Some(atelier_core::audit::changed_fields_metadata(&["content"])),
    )
    .await;

    Ok(Json(DataResponse { data: comment }))
}

// ---------------------------------------------------------------------------
// DELETE /comments/{id}
// ---------------------------------------------------------------------------

/// Hard-delete a comment. Its replies are deleted with it.
pub async fn delete_comment(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CommentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }));
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::COMMENT,
        id,
        actions::DELETED,
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
