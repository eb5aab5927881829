//! Handlers for inventory units.
//!
//! Each unit is one physical sample instance with its own status and
//! location. Availability is always computed from the unit rows at read
//! time via the core aggregator; no count is ever stored.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use atelier_core::audit::{actions, entity_types};
use atelier_core::catalog::{InventoryStatus, SampleColor, SampleSize, StorageLocation};
use atelier_core::error::CoreError;
use atelier_core::inventory::{
    available_count, group_units, status_breakdown, LocationGroup, UnitView,
};
use atelier_core::types::DbId;
use atelier_db::models::inventory::{
    CreateInventoryUnit, InventoryUnitWithVariant, UpdateInventoryUnit,
};
use atelier_db::repositories::{InventoryRepo, SampleItemRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::middleware::actor::ActorUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Aggregation response
// ---------------------------------------------------------------------------

/// Derived inventory view for one sample item or one production item.
#[derive(Debug, Serialize)]
pub struct InventorySummary {
    pub total: usize,
    pub available_count: usize,
    pub status_breakdown: BTreeMap<InventoryStatus, usize>,
    pub groups: Vec<LocationGroup>,
}

/// Parse joined unit rows into aggregator views and summarize them.
///
/// Rows hold catalog strings validated on write; a value that no longer
/// parses means the stored data and the catalog have diverged, which is an
/// internal error rather than caller input.
pub(crate) fn summarize_units(rows: &[InventoryUnitWithVariant]) -> AppResult<InventorySummary> {
    let units = rows
        .iter()
        .map(unit_view)
        .collect::<Result<Vec<UnitView>, CoreError>>()
        .map_err(|err| AppError::InternalError(format!("Corrupt catalog value: {err}")))?;

    Ok(InventorySummary {
        total: units.len(),
        available_count: available_count(&units),
        status_breakdown: status_breakdown(&units),
        groups: group_units(&units),
    })
}

fn unit_view(row: &InventoryUnitWithVariant) -> Result<UnitView, CoreError> {
    Ok(UnitView {
        unit_id: row.id,
        sample_item_id: row.sample_item_id,
        status: row.status.parse::<InventoryStatus>()?,
        location: atelier_core::catalog::parse_optional::<StorageLocation>(
            row.location.as_deref(),
        )?,
        size: atelier_core::catalog::parse_optional::<SampleSize>(row.size.as_deref())?,
        color: atelier_core::catalog::parse_optional::<SampleColor>(row.color.as_deref())?,
    })
}

// ---------------------------------------------------------------------------
// POST /inventory
// ---------------------------------------------------------------------------

/// Create a single inventory unit (default status AVAILABLE).
pub async fn create_unit(
    State(state): State<AppState>,
    actor: ActorUser,
    Json(input): Json<CreateInventoryUnit>,
) -> AppResult<impl IntoResponse> {
    // Catalog validation before touching the database.
    atelier_core::catalog::parse_optional::<StorageLocation>(input.location.as_deref())?;
    atelier_core::catalog::parse_optional::<InventoryStatus>(input.status.as_deref())?;

    if SampleItemRepo::find_by_id(&state.pool, input.sample_item_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::ReferentialIntegrity(format!(
            "Sample item {} does not exist",
            input.sample_item_id
        ))));
    }

    let unit = InventoryRepo::create(&state.pool, &input).await?;

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::INVENTORY_UNIT,
        unit.id,
        actions::CREATED,
        None,
    )
    .await;

    tracing::info!(
        unit_id = unit.id,
        sample_item_id = unit.sample_item_id,
        user_id = actor.user_id(),
        "Inventory unit created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: unit })))
}

// ---------------------------------------------------------------------------
// GET /inventory/{id}
// ---------------------------------------------------------------------------

/// Get a single inventory unit by ID.
pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let unit = InventoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "InventoryUnit",
                id,
            })
        })?;
    Ok(Json(DataResponse { data: unit }))
}

// ---------------------------------------------------------------------------
// PUT /inventory/{id}
// ---------------------------------------------------------------------------

/// Update a unit's status, location, or notes.
pub async fn update_unit(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInventoryUnit>,
) -> AppResult<impl IntoResponse> {
    atelier_core::catalog::parse_optional::<StorageLocation>(input.location.as_deref())?;
    atelier_core::catalog::parse_optional::<InventoryStatus>(input.status.as_deref())?;

    let unit = InventoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "InventoryUnit",
                id,
            })
        })?;

    let mut changed: Vec<&str> = Vec::new();
    if input.location.is_some() {
        changed.push("location");
    }
    if input.status.is_some() {
        changed.push("status");
    }
    if input.notes.is_some() {
        changed.push("notes");
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::INVENTORY_UNIT,
        id,
        actions::UPDATED,
        Some(atelier_core::audit::changed_fields_metadata(&changed)),
    )
    .await;

    Ok(Json(DataResponse { data: unit }))
}

// ---------------------------------------------------------------------------
// DELETE /inventory/{id}
// ---------------------------------------------------------------------------

/// Delete an inventory unit.
pub async fn delete_unit(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InventoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "InventoryUnit",
            id,
        }));
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::INVENTORY_UNIT,
        id,
        actions::DELETED,
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
