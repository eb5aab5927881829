//! Repository for the `sample_items` table.
//!
//! Variant uniqueness is enforced by the `uq_sample_items_variant`
//! constraint; racing creations are resolved by the database, and the
//! loser's violation is translated into a descriptive conflict by the
//! handler via [`SampleItemRepo::find_by_variant`].

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::sample_item::{CreateSampleItem, SampleItem, UpdateSampleItem};

/// Column list for sample_items queries.
const COLUMNS: &str = "\
    id, production_item_id, stage, color, size, revision, notes, \
    image_urls, created_at, updated_at";

/// Name of the variant uniqueness constraint in the schema.
pub const VARIANT_CONSTRAINT: &str = "uq_sample_items_variant";

/// Provides CRUD operations for sample items.
pub struct SampleItemRepo;

impl SampleItemRepo {
    /// Insert a new sample item, returning the created row.
    ///
    /// A duplicate variant tuple surfaces as a unique-violation database
    /// error on [`VARIANT_CONSTRAINT`].
    pub async fn create(
        pool: &PgPool,
        input: &CreateSampleItem,
    ) -> Result<SampleItem, sqlx::Error> {
        let image_urls = input.image_urls.clone().unwrap_or_default();
        let query = format!(
            "INSERT INTO sample_items
                (production_item_id, stage, color, size, revision, notes, image_urls)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SampleItem>(&query)
            .bind(input.production_item_id)
            .bind(&input.stage)
            .bind(&input.color)
            .bind(&input.size)
            .bind(&input.revision)
            .bind(&input.notes)
            .bind(&image_urls)
            .fetch_one(pool)
            .await
    }

    /// Find a sample item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SampleItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sample_items WHERE id = $1");
        sqlx::query_as::<_, SampleItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the sample item holding an exact variant tuple.
    ///
    /// NULL color/size match NULL (`IS NOT DISTINCT FROM`), mirroring how
    /// the uniqueness constraint treats them as concrete values.
    pub async fn find_by_variant(
        pool: &PgPool,
        production_item_id: DbId,
        stage: &str,
        color: Option<&str>,
        size: Option<&str>,
        revision: &str,
    ) -> Result<Option<SampleItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sample_items
             WHERE production_item_id = $1
               AND stage = $2
               AND color IS NOT DISTINCT FROM $3
               AND size IS NOT DISTINCT FROM $4
               AND revision = $5"
        );
        sqlx::query_as::<_, SampleItem>(&query)
            .bind(production_item_id)
            .bind(stage)
            .bind(color)
            .bind(size)
            .bind(revision)
            .fetch_optional(pool)
            .await
    }

    /// List all sample items of one production item.
    pub async fn list_by_production_item(
        pool: &PgPool,
        production_item_id: DbId,
    ) -> Result<Vec<SampleItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sample_items
             WHERE production_item_id = $1
             ORDER BY stage, color NULLS FIRST, size NULLS FIRST, revision, id"
        );
        sqlx::query_as::<_, SampleItem>(&query)
            .bind(production_item_id)
            .fetch_all(pool)
            .await
    }

    /// Update a sample item's annotations, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSampleItem,
    ) -> Result<Option<SampleItem>, sqlx::Error> {
        let query = format!(
            "UPDATE sample_items SET
                notes = COALESCE($2, notes),
                image_urls = COALESCE($3, image_urls),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SampleItem>(&query)
            .bind(id)
            .bind(&input.notes)
            .bind(&input.image_urls)
            .fetch_optional(pool)
            .await
    }

    /// Delete a sample item. Cascades to its inventory, requests, and
    /// comments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sample_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
