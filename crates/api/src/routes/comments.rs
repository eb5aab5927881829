//! Route definitions for comments.
//!
//! Mounted at `/comments` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes.
///
/// ```text
/// POST   /                  -> create_comment
/// GET    /                  -> get_thread (by entity, nested replies)
/// PUT    /{id}              -> update_comment
/// DELETE /{id}              -> delete_comment (replies go with it)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(comments::get_thread).post(comments::create_comment),
        )
        .route(
            "/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
}
