//! Repository for the `sample_inventory` table.
//!
//! Units are individual physical instances; there are no count columns.
//! The `*_with_variant` readers join the owning sample item's color/size
//! in for the aggregator.

use atelier_core::catalog::InventoryStatus;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::inventory::{
    CreateInventoryUnit, InventoryUnit, InventoryUnitWithVariant, UpdateInventoryUnit,
};

/// Column list for sample_inventory queries.
const COLUMNS: &str = "id, sample_item_id, location, status, notes, created_at, updated_at";

/// Column list for the variant-joined readers (`u` = sample_inventory,
/// `si` = sample_items).
const JOINED_COLUMNS: &str = "\
    u.id, u.sample_item_id, u.location, u.status, si.color, si.size";

/// Provides CRUD and aggregation-feed operations for inventory units.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Create a single inventory unit, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInventoryUnit,
    ) -> Result<InventoryUnit, sqlx::Error> {
        let status = input
            .status
            .as_deref()
            .unwrap_or(InventoryStatus::Available.as_str());
        let query = format!(
            "INSERT INTO sample_inventory (sample_item_id, location, status, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryUnit>(&query)
            .bind(input.sample_item_id)
            .bind(&input.location)
            .bind(status)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Seed `quantity` AVAILABLE units of one sample item at a location.
    ///
    /// Used by batch sample-item creation; a single multi-row insert.
    pub async fn seed_units(
        pool: &PgPool,
        sample_item_id: DbId,
        location: Option<&str>,
        quantity: i64,
    ) -> Result<Vec<InventoryUnit>, sqlx::Error> {
        if quantity <= 0 {
            return Ok(Vec::new());
        }
        let query = format!(
            "INSERT INTO sample_inventory (sample_item_id, location, status)
             SELECT $1::BIGINT, $2::TEXT, $3::TEXT FROM generate_series(1, $4::BIGINT)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryUnit>(&query)
            .bind(sample_item_id)
            .bind(location)
            .bind(InventoryStatus::Available.as_str())
            .bind(quantity)
            .fetch_all(pool)
            .await
    }

    /// Find an inventory unit by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<InventoryUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sample_inventory WHERE id = $1");
        sqlx::query_as::<_, InventoryUnit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All units of one sample item, with variant fields joined in.
    pub async fn list_by_sample_item(
        pool: &PgPool,
        sample_item_id: DbId,
    ) -> Result<Vec<InventoryUnitWithVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM sample_inventory u
             JOIN sample_items si ON si.id = u.sample_item_id
             WHERE u.sample_item_id = $1
             ORDER BY u.id"
        );
        sqlx::query_as::<_, InventoryUnitWithVariant>(&query)
            .bind(sample_item_id)
            .fetch_all(pool)
            .await
    }

    /// All units across every sample item of one production item.
    pub async fn list_by_production_item(
        pool: &PgPool,
        production_item_id: DbId,
    ) -> Result<Vec<InventoryUnitWithVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM sample_inventory u
             JOIN sample_items si ON si.id = u.sample_item_id
             WHERE si.production_item_id = $1
             ORDER BY u.id"
        );
        sqlx::query_as::<_, InventoryUnitWithVariant>(&query)
            .bind(production_item_id)
            .fetch_all(pool)
            .await
    }

    /// Update a unit's status/location/notes, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInventoryUnit,
    ) -> Result<Option<InventoryUnit>, sqlx::Error> {
        let query = format!(
            "UPDATE sample_inventory SET
                location = COALESCE($2, location),
                status = COALESCE($3, status),
                notes = COALESCE($4, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryUnit>(&query)
            .bind(id)
            .bind(&input.location)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an inventory unit.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sample_inventory WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
