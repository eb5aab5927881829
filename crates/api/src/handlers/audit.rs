//! Handlers for the audit trail.
//!
//! Read-only: events are appended by the mutating handlers via
//! [`crate::handlers::record_audit`], never through this surface.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use atelier_core::audit::is_known_entity_type;
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::repositories::AuditEventRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for fetching an entity's audit trail.
#[derive(Debug, Deserialize)]
pub struct AuditTrailParams {
    pub entity_type: String,
    pub entity_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// GET /audit?entity_type=&entity_id=
// ---------------------------------------------------------------------------

/// All audit events for one (entity_type, entity_id), newest first.
pub async fn get_audit_trail(
    State(state): State<AppState>,
    Query(params): Query<AuditTrailParams>,
) -> AppResult<impl IntoResponse> {
    if !is_known_entity_type(&params.entity_type) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown entity type '{}'",
            params.entity_type
        ))));
    }

    let events = AuditEventRepo::list_by_entity(
        &state.pool,
        &params.entity_type,
        params.entity_id,
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: events }))
}
