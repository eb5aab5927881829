//! Route definitions for teams.
//!
//! Mounted at `/teams` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Team routes.
///
/// ```text
/// POST   /                  -> create_team
/// GET    /                  -> list_teams
/// GET    /{id}              -> get_team
/// PUT    /{id}              -> update_team
/// DELETE /{id}              -> delete_team (refused while requests exist)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list_teams).post(teams::create_team))
        .route(
            "/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
}
