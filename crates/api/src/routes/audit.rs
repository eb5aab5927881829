//! Route definitions for the audit trail.
//!
//! Mounted at `/audit` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Audit trail routes.
///
/// ```text
/// GET    /                  -> get_audit_trail
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(audit::get_audit_trail))
}
