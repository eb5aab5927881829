//! Sample item (variation) models and DTOs.
//!
//! The tuple (production_item_id, stage, color, size, revision) is unique;
//! NULL color/size participate as distinct values. The database enforces
//! this via the `uq_sample_items_variant` constraint.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sample_items` table: one concrete variation of a
/// production item at a production stage.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SampleItem {
    pub id: DbId,
    pub production_item_id: DbId,
    pub stage: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub revision: String,
    pub notes: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a sample item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSampleItem {
    pub production_item_id: DbId,
    pub stage: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub revision: String,
    pub notes: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

/// DTO for patching a sample item. The variant tuple itself is immutable
/// after creation; only annotations can change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSampleItem {
    pub notes: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

/// One variation spec inside a batch-creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct VariationSpec {
    pub stage: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub revision: String,
    pub notes: Option<String>,
    /// When > 0, this many AVAILABLE inventory units are seeded at
    /// `location` after the sample item is created.
    pub initial_quantity: Option<i64>,
    pub location: Option<String>,
}

/// Request body for batch sample-item creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSampleItemBatch {
    pub production_item_id: DbId,
    pub variations: Vec<VariationSpec>,
}
