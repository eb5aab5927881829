//! Route definitions for sample items.
//!
//! Mounted at `/sample-items` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sample_items;
use crate::state::AppState;

/// Sample item routes.
///
/// ```text
/// POST   /                  -> create_sample_item
/// GET    /                  -> list_sample_items
/// POST   /batch             -> create_sample_item_batch
/// GET    /{id}              -> get_sample_item
/// PUT    /{id}              -> update_sample_item
/// DELETE /{id}              -> delete_sample_item
/// GET    /{id}/inventory    -> get_inventory
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sample_items::list_sample_items).post(sample_items::create_sample_item),
        )
        .route("/batch", post(sample_items::create_sample_item_batch))
        .route(
            "/{id}",
            get(sample_items::get_sample_item)
                .put(sample_items::update_sample_item)
                .delete(sample_items::delete_sample_item),
        )
        .route("/{id}/inventory", get(sample_items::get_inventory))
}
