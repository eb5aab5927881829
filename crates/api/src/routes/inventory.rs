//! Route definitions for inventory units.
//!
//! Mounted at `/inventory` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Inventory unit routes.
///
/// ```text
/// POST   /                  -> create_unit
/// GET    /{id}              -> get_unit
/// PUT    /{id}              -> update_unit
/// DELETE /{id}              -> delete_unit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(inventory::create_unit))
        .route(
            "/{id}",
            get(inventory::get_unit)
                .put(inventory::update_unit)
                .delete(inventory::delete_unit),
        )
}
