//! Handlers for sample items (variations).
//!
//! Variant uniqueness is resolved by the database constraint; the loser of
//! a racing creation gets a conflict error that names the pre-existing
//! row's product, stage, color, size, and revision, which requires a
//! follow-up read after the violation is detected.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use atelier_core::audit::{actions, entity_types};
use atelier_core::catalog::{parse_optional, SampleColor, SampleSize, SampleStage, StorageLocation};
use atelier_core::error::CoreError;
use atelier_core::samples::validate_revision;
use atelier_core::types::DbId;
use atelier_db::models::sample_item::{
    CreateSampleItem, CreateSampleItemBatch, SampleItem, UpdateSampleItem, VariationSpec,
};
use atelier_db::repositories::sample_item_repo::VARIANT_CONSTRAINT;
use atelier_db::repositories::{InventoryRepo, ProductionItemRepo, SampleItemRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::inventory::summarize_units;
use crate::handlers::record_audit;
use crate::middleware::actor::ActorUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Listing filter: all sample items of one production item.
#[derive(Debug, Deserialize)]
pub struct ListSampleItemParams {
    pub production_item_id: DbId,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate the catalog fields of a creation payload.
fn validate_variant_fields(
    stage: &str,
    color: Option<&str>,
    size: Option<&str>,
    revision: &str,
) -> Result<(), CoreError> {
    stage.parse::<SampleStage>()?;
    parse_optional::<SampleColor>(color)?;
    parse_optional::<SampleSize>(size)?;
    validate_revision(revision)?;
    Ok(())
}

/// Build the descriptive conflict error for a duplicate variant tuple.
///
/// Looks up the pre-existing conflicting row (the constraint violation
/// does not hand its values back) and names its product and variant
/// fields. Falls back to a generic message if the row vanished between
/// the violation and the follow-up read.
async fn variant_conflict_error(
    pool: &sqlx::PgPool,
    production_item_id: DbId,
    stage: &str,
    color: Option<&str>,
    size: Option<&str>,
    revision: &str,
) -> AppError {
    let existing = match SampleItemRepo::find_by_variant(
        pool,
        production_item_id,
        stage,
        color,
        size,
        revision,
    )
    .await
    {
        Ok(Some(item)) => item,
        _ => {
            return AppError::Core(CoreError::Conflict(
                "A sample item with this variation already exists".to_string(),
            ));
        }
    };

    let product_name = match ProductionItemRepo::find_by_id(pool, production_item_id).await {
        Ok(Some(item)) => item.name,
        _ => format!("#{production_item_id}"),
    };

    AppError::Core(CoreError::Conflict(format!(
        "A sample item for product '{}' already exists with stage {}, color {}, size {}, revision {} (id {})",
        product_name,
        existing.stage,
        existing.color.as_deref().unwrap_or("NONE"),
        existing.size.as_deref().unwrap_or("NONE"),
        existing.revision,
        existing.id,
    )))
}

/// Create one sample item, translating a variant uniqueness violation
/// into the descriptive conflict error.
async fn create_checked(
    pool: &sqlx::PgPool,
    input: &CreateSampleItem,
) -> AppResult<SampleItem> {
    match SampleItemRepo::create(pool, input).await {
        Ok(item) => Ok(item),
        Err(err) if atelier_db::is_unique_violation(&err, VARIANT_CONSTRAINT) => {
            Err(variant_conflict_error(
                pool,
                input.production_item_id,
                &input.stage,
                input.color.as_deref(),
                input.size.as_deref(),
                &input.revision,
            )
            .await)
        }
        Err(err) => Err(err.into()),
    }
}

// ---------------------------------------------------------------------------
// POST /sample-items
// ---------------------------------------------------------------------------

/// Create a new sample item.
pub async fn create_sample_item(
    State(state): State<AppState>,
    actor: ActorUser,
    Json(input): Json<CreateSampleItem>,
) -> AppResult<impl IntoResponse> {
    validate_variant_fields(
        &input.stage,
        input.color.as_deref(),
        input.size.as_deref(),
        &input.revision,
    )?;

    if ProductionItemRepo::find_by_id(&state.pool, input.production_item_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::ReferentialIntegrity(format!(
            "Production item {} does not exist",
            input.production_item_id
        ))));
    }

    let item = create_checked(&state.pool, &input).await?;

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::SAMPLE_ITEM,
        item.id,
        actions::CREATED,
        None,
    )
    .await;

    tracing::info!(
        sample_item_id = item.id,
        production_item_id = item.production_item_id,
        user_id = actor.user_id(),
        "Sample item created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// POST /sample-items/batch
// ---------------------------------------------------------------------------

/// Create several variations for one production item, optionally seeding
/// inventory units for each.
///
/// Variations are processed sequentially and independently, fail-fast: a
/// uniqueness failure aborts the batch with an error identifying that
/// variation, leaving previously created variations committed. No
/// transaction wraps the batch.
pub async fn create_sample_item_batch(
    State(state): State<AppState>,
    actor: ActorUser,
    Json(input): Json<CreateSampleItemBatch>,
) -> AppResult<impl IntoResponse> {
    if input.variations.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Batch must contain at least one variation".to_string(),
        )));
    }

    // Validate every variation up front; a bad catalog value should fail
    // the batch before anything is written.
    for (idx, spec) in input.variations.iter().enumerate() {
        validate_variant_fields(
            &spec.stage,
            spec.color.as_deref(),
            spec.size.as_deref(),
            &spec.revision,
        )
        .map_err(|err| {
            AppError::Core(CoreError::Validation(format!("Variation {}: {err}", idx + 1)))
        })?;
        parse_optional::<StorageLocation>(spec.location.as_deref())?;
        if let Some(qty) = spec.initial_quantity {
            if qty < 0 {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Variation {}: initial_quantity must not be negative",
                    idx + 1
                ))));
            }
        }
    }

    if ProductionItemRepo::find_by_id(&state.pool, input.production_item_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::ReferentialIntegrity(format!(
            "Production item {} does not exist",
            input.production_item_id
        ))));
    }

    let mut created: Vec<SampleItem> = Vec::with_capacity(input.variations.len());

    for (idx, spec) in input.variations.iter().enumerate() {
        let item = create_one_variation(&state.pool, input.production_item_id, spec)
            .await
            .map_err(|err| annotate_batch_error(err, idx))?;

        let seeded = spec.initial_quantity.unwrap_or(0);
        if seeded > 0 {
            InventoryRepo::seed_units(&state.pool, item.id, spec.location.as_deref(), seeded)
                .await?;
        }

        record_audit(
            &state.pool,
            actor.context(),
            entity_types::SAMPLE_ITEM,
            item.id,
            actions::CREATED,
            Some(serde_json::json!({ "seeded_units": seeded })),
        )
        .await;

        created.push(item);
    }

    tracing::info!(
        production_item_id = input.production_item_id,
        created = created.len(),
        user_id = actor.user_id(),
        "Sample item batch created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// Create a single variation within a batch.
async fn create_one_variation(
    pool: &sqlx::PgPool,
    production_item_id: DbId,
    spec: &VariationSpec,
) -> AppResult<SampleItem> {
    let input = CreateSampleItem {
        production_item_id,
        stage: spec.stage.clone(),
        color: spec.color.clone(),
        size: spec.size.clone(),
        revision: spec.revision.clone(),
        notes: spec.notes.clone(),
        image_urls: None,
    };
    create_checked(pool, &input).await
}

/// Prefix a batch failure with the 1-based variation index it came from.
fn annotate_batch_error(err: AppError, idx: usize) -> AppError {
    match err {
        AppError::Core(CoreError::Conflict(msg)) => AppError::Core(CoreError::Conflict(format!(
            "Variation {}: {msg}",
            idx + 1
        ))),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// GET /sample-items?production_item_id=
// ---------------------------------------------------------------------------

/// List all sample items of one production item.
pub async fn list_sample_items(
    State(state): State<AppState>,
    Query(params): Query<ListSampleItemParams>,
) -> AppResult<impl IntoResponse> {
    let items =
        SampleItemRepo::list_by_production_item(&state.pool, params.production_item_id).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /sample-items/{id}
// ---------------------------------------------------------------------------

/// Get a single sample item by ID.
pub async fn get_sample_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = SampleItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "SampleItem",
                id,
            })
        })?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// PUT /sample-items/{id}
// ---------------------------------------------------------------------------

/// Update a sample item's annotations. The variant tuple is immutable.
pub async fn update_sample_item(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSampleItem>,
) -> AppResult<impl IntoResponse> {
    let item = SampleItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "SampleItem",
                id,
            })
        })?;

    let mut changed: Vec<&str> = Vec::new();
    if input.notes.is_some() {
        changed.push("notes");
    }
    if input.image_urls.is_some() {
        changed.push("image_urls");
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::SAMPLE_ITEM,
        id,
        actions::UPDATED,
        Some(atelier_core::audit::changed_fields_metadata(&changed)),
    )
    .await;

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// DELETE /sample-items/{id}
// ---------------------------------------------------------------------------

/// Delete a sample item. Cascades to its inventory, requests, and comments.
pub async fn delete_sample_item(
    State(state): State<AppState>,
    actor: ActorUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SampleItemRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SampleItem",
            id,
        }));
    }

    record_audit(
        &state.pool,
        actor.context(),
        entity_types::SAMPLE_ITEM,
        id,
        actions::DELETED,
        None,
    )
    .await;

    tracing::info!(sample_item_id = id, user_id = actor.user_id(), "Sample item deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /sample-items/{id}/inventory
// ---------------------------------------------------------------------------

/// Derived inventory view for one sample item.
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if SampleItemRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SampleItem",
            id,
        }));
    }

    let rows = InventoryRepo::list_by_sample_item(&state.pool, id).await?;
    let summary = summarize_units(&rows)?;
    Ok(Json(DataResponse { data: summary }))
}
