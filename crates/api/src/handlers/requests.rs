//! Handlers for sample requests.
//!
//! Status writes are validated against the lifecycle transition table and
//! applied as a compare-and-set on the previously-read status; the stage
//! timestamp for the target status is stamped only on first entry. Every
//! status change and every other field update is recorded as a distinct
//! audit event.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::audit::{actions, entity_types, status_change_metadata};
use atelier_core::error::CoreError;
use atelier_core::lifecycle::{self, RequestStatus};
use atelier_core::types::DbId;
use atelier_db::models::request::{
    CreateSampleRequest, RequestQuery, RequestStats, SampleRequest, UpdateRequestStatus,
    UpdateSampleRequest,
};
use atelier_db::repositories::{RequestRepo, SampleItemRepo, TeamRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::middleware::actor::ActorUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a request exists, returning the full row.
async fn ensure_request_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<SampleRequest> {
    RequestRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "SampleRequest",
            id,
        })
    })
}

/// Parse a stored status string, which must always be a catalog member.
fn parse_stored_status(status: &str) -> AppResult<RequestStatus> {
    status
        .parse::<RequestStatus>()
        .map_err(|err| AppError::InternalError(format!("Corrupt stored status: {err}")))
}

/// Apply a status write to a request and record the matching audit event.
///
/// A target equal to the current status is a manual correction: it skips
/// transition validation, cannot overwrite the already-stamped timestamp
/// (the stamp is `COALESCE`), and is audited as UPDATED. A different
/// target must be in the allowed set and is audited as STATUS_CHANGED.
/// The UPDATE is keyed on the previously-read status, so a concurrent
/// transition surfaces as a conflict instead of being clobbered.
async fn apply_status_write(
    state: &AppState,
    actor: ActorUser,
    id: DbId,
    current: RequestStatus,
    next: RequestStatus,
) -> AppResult<SampleRequest> {
    if next != current {
        lifecycle::validate_transition(current, next)?;
    }

    let updated = RequestRepo::update_status(
        &state.pool,
        id,
        current.as_str(),
        next.as_str(),
        next.stamp_column(),
    )
    .await?;

    let request = match updated {
        Some(request) => request,
        None => {
            // Zero rows matched: the request is gone, or another writer
            // moved it off `current` first.
            ensure_request_exists(&state.pool, id).await?;
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Request {id} was modified concurrently; expected status {current}"
            ))));
        }
    };

    if next != current {
        record_audit(
            &state.pool,
            actor.context(),
            entity_types::SAMPLE_REQUEST,
            id,
            actions::STATUS_CHANGED,
            Some(status_change_metadata(current.as_str(), next.as_str())),
        )
        .await;
        tracing::info!(
            request_id = id,
            from = current.as_str(),
            to = next.as_str(),
            user_id = actor.user_id(),
            "Request status changed"
        );
    } else {
        record_audit(
            &state.pool,
            actor.context(),
            entity_types::SAMPLE_REQUEST,
            id,
            actions::UPDATED,
            Some(atelier_core::audit::changed_fields_metadata(&["status"])),
        )
        .await;
    }

    Ok(request)
}

// ---------------------------------------------------------------------------
// POST /requests
// ---------------------------------------------------------------------------

/// Create a new request in REQUESTED with `requested_at` = now.
pub async fn create_request(
    State(state): State<AppState>,
    actor: ActorUser,
    Json(input): Json<CreateSampleRequest>,
) -> AppResult<impl IntoResponse> {
    lifecycle::validate_quantity(input.quantity)?;

    if SampleItemRepo::find_by_id(&state.pool, input.sample_item_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::ReferentialIntegrity(format!(
            "Sample item {} does not exist",
            input.sample_item_id
        ))));
    }
    if TeamRepo::find_by_id(&state.pool, input.team_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::ReferentialIntegrity(format!(
            "Team {} does not exist",
            input.team_id
        ))));
    }

    let request = RequestRepo::create(&state.pool, &input).await?;

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::SAMPLE_REQUEST,
        request.id,
        actions::CREATED,
        None,
    )
    .await;

    tracing::info!(
        request_id = request.id,
        sample_item_id = request.sample_item_id,
        team_id = request.team_id,
        quantity = request.quantity,
        user_id = actor.user_id(),
        "Sample request created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

// ---------------------------------------------------------------------------
// GET /requests
// ---------------------------------------------------------------------------

/// List requests, optionally filtered by team, sample item, or status.
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<RequestQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        status.parse::<RequestStatus>()?;
    }
    let requests = RequestRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: requests }))
}

// ---------------------------------------------------------------------------
// GET /requests/stats
// ---------------------------------------------------------------------------

/// Aggregate request counts: total plus a per-status breakdown that is
/// complete over every lifecycle status.
pub async fn get_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = RequestRepo::count_by_status(&state.pool).await?;

    let mut by_status: BTreeMap<String, i64> = RequestStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    let mut total = 0;
    for (status, count) in rows {
        total += count;
        *by_status.entry(status).or_insert(0) += count;
    }

    Ok(Json(DataResponse {
        data: RequestStats { total, by_status },
    }))
}

// ---------------------------------------------------------------------------
// GET /requests/{id}
// ---------------------------------------------------------------------------

/// Get a single request by ID.
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = ensure_request_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: request }))
}

// ---------------------------------------------------------------------------
// PUT /requests/{id}/status
// ---------------------------------------------------------------------------

/// Apply a pure status transition.
pub async fn update_request_status(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequestStatus>,
) -> AppResult<impl IntoResponse> {
    let next = input.status.parse::<RequestStatus>()?;
    let request = ensure_request_exists(&state.pool, id).await?;
    let current = parse_stored_status(&request.status)?;

    let updated = apply_status_write(&state, actor, id, current, next).await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /requests/{id}
// ---------------------------------------------------------------------------

/// General request patch: optional status transition plus quantity,
/// shipping, and notes edits. Field edits never touch the lifecycle
/// timestamps; when both a status change and field edits are present,
/// each is recorded as its own audit event.
pub async fn update_request(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSampleRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(quantity) = input.quantity {
        lifecycle::validate_quantity(quantity)?;
    }

    let request = ensure_request_exists(&state.pool, id).await?;
    let mut latest = request.clone();

    if let Some(ref status) = input.status {
        let next = status.parse::<RequestStatus>()?;
        let current = parse_stored_status(&request.status)?;
        latest = apply_status_write(&state, actor, id, current, next).await?;
    }

    let mut changed: Vec<&str> = Vec::new();
    if input.quantity.is_some() {
        changed.push("quantity");
    }
    if input.shipping_method.is_some() {
        changed.push("shipping_method");
    }
    if input.shipping_address.is_some() {
        changed.push("shipping_address");
    }
    if input.notes.is_some() {
        changed.push("notes");
    }

    if !changed.is_empty() {
        latest = RequestRepo::update_fields(&state.pool, id, &input)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "SampleRequest",
                    id,
                })
            })?;

        record_audit(
            &state.pool,
            actor.context(),
            entity_types::SAMPLE_REQUEST,
            id,
            actions::UPDATED,
            Some(atelier_core::audit::changed_fields_metadata(&changed)),
        )
        .await;
    }

    Ok(Json(DataResponse { data: latest }))
}

// ---------------------------------------------------------------------------
// DELETE /requests/{id}
// ---------------------------------------------------------------------------

/// Delete a request.
pub async fn delete_request(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RequestRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SampleRequest",
            id,
        }));
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::SAMPLE_REQUEST,
        id,
        actions::DELETED,
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
