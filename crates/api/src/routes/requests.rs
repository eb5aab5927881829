//! Route definitions for sample requests.
//!
//! Mounted at `/requests` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// Sample request routes.
///
/// ```text
/// POST   /                  -> create_request
/// GET    /                  -> list_requests
/// GET    /stats             -> get_stats
/// GET    /{id}              -> get_request
/// PUT    /{id}              -> update_request
/// DELETE /{id}              -> delete_request
/// PUT    /{id}/status       -> update_request_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/stats", get(requests::get_stats))
        .route(
            "/{id}",
            get(requests::get_request)
                .put(requests::update_request)
                .delete(requests::delete_request),
        )
        .route("/{id}/status", put(requests::update_request_status))
}
