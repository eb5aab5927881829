//! Route definitions for production items.
//!
//! Mounted at `/production-items` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::production_items;
use crate::state::AppState;

/// Production item routes.
///
/// ```text
/// POST   /                  -> create_item
/// GET    /                  -> list_items
/// GET    /{id}              -> get_item
/// PUT    /{id}              -> update_item
/// DELETE /{id}              -> delete_item
/// GET    /{id}/inventory    -> get_inventory
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(production_items::list_items).post(production_items::create_item),
        )
        .route(
            "/{id}",
            get(production_items::get_item)
                .put(production_items::update_item)
                .delete(production_items::delete_item),
        )
        .route("/{id}/inventory", get(production_items::get_inventory))
}
