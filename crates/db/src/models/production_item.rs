//! Production item models and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `production_items` table: a sellable product design.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductionItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a production item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductionItem {
    pub name: String,
    pub description: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

/// DTO for patching a production item.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductionItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_urls: Option<Vec<String>>,
}
