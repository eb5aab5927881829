pub mod audit;
pub mod comments;
pub mod health;
pub mod inventory;
pub mod production_items;
pub mod requests;
pub mod sample_items;
pub mod teams;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /production-items                     list, create
/// /production-items/{id}                get, update, delete (cascades)
/// /production-items/{id}/inventory      aggregated availability (GET)
///
/// /sample-items                         list by product, create
/// /sample-items/batch                   batch create with inventory (POST)
/// /sample-items/{id}                    get, update, delete
/// /sample-items/{id}/inventory          aggregated availability (GET)
///
/// /inventory                            create unit (POST)
/// /inventory/{id}                       get, update, delete
///
/// /teams                                list, create
/// /teams/{id}                           get, update, delete (guarded)
///
/// /requests                             list, create
/// /requests/stats                       total + per-status counts (GET)
/// /requests/{id}                        get, update, delete
/// /requests/{id}/status                 status transition (PUT)
///
/// /comments                             thread fetch (GET), create (POST)
/// /comments/{id}                        update, delete
///
/// /audit                                entity audit trail (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/production-items", production_items::router())
        .nest("/sample-items", sample_items::router())
        .nest("/inventory", inventory::router())
        .nest("/teams", teams::router())
        .nest("/requests", requests::router())
        .nest("/comments", comments::router())
        .nest("/audit", audit::router())
}
