//! Repository for the `audit_events` table.
//!
//! Append and read only. No update or delete method exists, matching the
//! append-only contract of the trail.

use atelier_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::audit::{AuditEvent, CreateAuditEvent};

/// Column list for audit_events queries.
const COLUMNS: &str = "id, entity_type, entity_id, action, user_id, metadata, created_at";

/// Provides append and query operations for audit events.
pub struct AuditEventRepo;

impl AuditEventRepo {
    /// Append one audit event, returning the persisted row.
    pub async fn append(
        pool: &PgPool,
        input: &CreateAuditEvent,
    ) -> Result<AuditEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_events (entity_type, entity_id, action, user_id, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditEvent>(&query)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.action)
            .bind(input.user_id)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// All events for one (entity_type, entity_id), newest first.
    pub async fn list_by_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<AuditEvent>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM audit_events
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, AuditEvent>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
