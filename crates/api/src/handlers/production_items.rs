//! Handlers for production items.
//!
//! A production item is a sellable product design owning sample items;
//! deleting one cascades through its sample items to inventory, requests,
//! and comments. The `/inventory` endpoint aggregates availability across
//! every sample item of the product.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::audit::{actions, entity_types};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::production_item::{CreateProductionItem, UpdateProductionItem};
use atelier_db::repositories::{InventoryRepo, ProductionItemRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::inventory::summarize_units;
use crate::handlers::record_audit;
use crate::middleware::actor::ActorUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a production item exists, returning the full row.
pub(crate) async fn ensure_item_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<atelier_db::models::production_item::ProductionItem> {
    ProductionItemRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ProductionItem",
                id,
            })
        })
}

// ---------------------------------------------------------------------------
// POST /production-items
// ---------------------------------------------------------------------------

/// Create a new production item.
pub async fn create_item(
    State(state): State<AppState>,
    actor: ActorUser,
    Json(input): Json<CreateProductionItem>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Production item name must not be empty".to_string(),
        )));
    }

    let item = ProductionItemRepo::create(&state.pool, &input).await?;

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::PRODUCTION_ITEM,
        item.id,
        actions::CREATED,
        None,
    )
    .await;

    tracing::info!(item_id = item.id, user_id = actor.user_id(), "Production item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// GET /production-items
// ---------------------------------------------------------------------------

/// List production items, newest first.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items = ProductionItemRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /production-items/{id}
// ---------------------------------------------------------------------------

/// Get a single production item by ID.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ensure_item_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// PUT /production-items/{id}
// ---------------------------------------------------------------------------

/// Update a production item.
pub async fn update_item(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductionItem>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Production item name must not be empty".to_string(),
            )));
        }
    }

    let item = ProductionItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ProductionItem",
                id,
            })
        })?;

    let mut changed: Vec<&str> = Vec::new();
    if input.name.is_some() {
        changed.push("name");
    }
    if input.description.is_some() {
        changed.push("description");
    }
    if input.image_urls.is_some() {
        changed.push("image_urls");
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::PRODUCTION_ITEM,
        id,
        actions::UPDATED,
        Some(atelier_core::audit::changed_fields_metadata(&changed)),
    )
    .await;

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// DELETE /production-items/{id}
// ---------------------------------------------------------------------------

/// Delete a production item and everything it owns.
pub async fn delete_item(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductionItemRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProductionItem",
            id,
        }));
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::PRODUCTION_ITEM,
        id,
        actions::DELETED,
        None,
    )
    .await;

    tracing::info!(item_id = id, user_id = actor.user_id(), "Production item deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /production-items/{id}/inventory
// ---------------------------------------------------------------------------

/// Aggregate inventory across every sample item of one production item.
///
/// Availability is derived from the unit rows on each read; nothing is
/// cached.
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_item_exists(&state.pool, id).await?;

    let rows = InventoryRepo::list_by_production_item(&state.pool, id).await?;
    let summary = summarize_units(&rows)?;
    Ok(Json(DataResponse { data: summary }))
}
