//! Audit event models and DTOs.
//!
//! Audit events are immutable once created: there is no update DTO and no
//! `updated_at` column.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `audit_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditEvent {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub action: String,
    pub user_id: DbId,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for appending an audit event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditEvent {
    pub entity_type: String,
    pub entity_id: DbId,
    pub action: String,
    pub user_id: DbId,
    pub metadata: Option<serde_json::Value>,
}
