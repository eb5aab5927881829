//! Repository for the `production_items` table.

use atelier_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::production_item::{
    CreateProductionItem, ProductionItem, UpdateProductionItem,
};

/// Column list for production_items queries.
const COLUMNS: &str = "id, name, description, image_urls, created_at, updated_at";

/// Provides CRUD operations for production items.
pub struct ProductionItemRepo;

impl ProductionItemRepo {
    /// Create a new production item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductionItem,
    ) -> Result<ProductionItem, sqlx::Error> {
        let image_urls = input.image_urls.clone().unwrap_or_default();
        let query = format!(
            "INSERT INTO production_items (name, description, image_urls)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionItem>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&image_urls)
            .fetch_one(pool)
            .await
    }

    /// Find a production item by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductionItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM production_items WHERE id = $1");
        sqlx::query_as::<_, ProductionItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List production items, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ProductionItem>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM production_items
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ProductionItem>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a production item by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductionItem,
    ) -> Result<Option<ProductionItem>, sqlx::Error> {
        let query = format!(
            "UPDATE production_items SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_urls = COALESCE($4, image_urls),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_urls)
            .fetch_optional(pool)
            .await
    }

    /// Delete a production item. Cascades through its sample items to
    /// inventory, requests, and comments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM production_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
