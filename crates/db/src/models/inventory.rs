//! Inventory unit models and DTOs.
//!
//! One row per physical, individually-trackable sample unit. There is no
//! quantity column anywhere: counts are derived by the aggregator.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sample_inventory` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryUnit {
    pub id: DbId,
    pub sample_item_id: DbId,
    pub location: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An inventory unit with the owning sample item's variant fields joined
/// in, as consumed by the aggregator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryUnitWithVariant {
    pub id: DbId,
    pub sample_item_id: DbId,
    pub location: Option<String>,
    pub status: String,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// DTO for creating an inventory unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInventoryUnit {
    pub sample_item_id: DbId,
    pub location: Option<String>,
    /// Defaults to AVAILABLE.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// DTO for patching an inventory unit.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInventoryUnit {
    pub location: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
