//! Handlers for teams.
//!
//! Team names are intentionally unconstrained (duplicates allowed). The
//! one invariant lives in the delete path: a team with existing requests
//! cannot be deleted.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::audit::{actions, entity_types};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::team::{CreateTeam, Team, UpdateTeam};
use atelier_db::repositories::TeamRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::middleware::actor::ActorUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Verify that a team exists, returning the full row.
async fn ensure_team_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Team> {
    TeamRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound { entity: "Team", id })
    })
}

// ---------------------------------------------------------------------------
// POST /teams
// ---------------------------------------------------------------------------

/// Create a new team.
pub async fn create_team(
    State(state): State<AppState>,
    actor: ActorUser,
    Json(input): Json<CreateTeam>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Team name must not be empty".to_string(),
        )));
    }

    let team = TeamRepo::create(&state.pool, &input).await?;

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::TEAM,
        team.id,
        actions::CREATED,
        None,
    )
    .await;

    tracing::info!(team_id = team.id, user_id = actor.user_id(), "Team created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}

// ---------------------------------------------------------------------------
// GET /teams
// ---------------------------------------------------------------------------

/// List teams alphabetically.
pub async fn list_teams(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let teams = TeamRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: teams }))
}

// ---------------------------------------------------------------------------
// GET /teams/{id}
// ---------------------------------------------------------------------------

/// Get a single team by ID.
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let team = ensure_team_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: team }))
}

// ---------------------------------------------------------------------------
// PUT /teams/{id}
// ---------------------------------------------------------------------------

/// Update a team.
pub async fn update_team(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeam>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Team name must not be empty".to_string(),
            )));
        }
    }

    let team = TeamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Team", id }))?;

    let mut changed: Vec<&str> = Vec::new();
    if input.name.is_some() {
        changed.push("name");
    }
    if input.shipping_address.is_some() {
        changed.push("shipping_address");
    }
    if input.contact_email.is_some() {
        changed.push("contact_email");
    }
    if input.contact_phone.is_some() {
        changed.push("contact_phone");
    }
    if input.is_internal.is_some() {
        changed.push("is_internal");
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::TEAM,
        id,
        actions::UPDATED,
        Some(atelier_core::audit::changed_fields_metadata(&changed)),
    )
    .await;

    Ok(Json(DataResponse { data: team }))
}

// ---------------------------------------------------------------------------
// DELETE /teams/{id}
// ---------------------------------------------------------------------------

/// Delete a team.
///
/// Refused while the team has existing requests: the team row is left
/// unchanged and the caller gets a referential-integrity error.
pub async fn delete_team(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_team_exists(&state.pool, id).await?;

    let request_count = TeamRepo::count_requests(&state.pool, id).await?;
    if request_count > 0 {
        return Err(AppError::Core(CoreError::ReferentialIntegrity(format!(
            "Team {id} has {request_count} sample request(s) and cannot be deleted"
        ))));
    }

    let deleted = TeamRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Team", id }));
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::TEAM,
        id,
        actions::DELETED,
        None,
    )
    .await;

    tracing::info!(team_id = id, user_id = actor.user_id(), "Team deleted");
    Ok(StatusCode::NO_CONTENT)
}
