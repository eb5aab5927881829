//! HTTP handlers, one module per resource.

use atelier_core::actor::ActorContext;
use atelier_core::types::DbId;
use atelier_db::models::audit::CreateAuditEvent;
use atelier_db::repositories::AuditEventRepo;
use sqlx::PgPool;

pub mod audit;
pub mod comments;
pub mod inventory;
pub mod production_items;
pub mod requests;
pub mod sample_items;
pub mod teams;

/// Append an audit event for a mutation that already succeeded.
///
/// The write is awaited so caller latency includes it, but it is not part
/// of the primary mutation's transaction: a failed audit write is logged
/// and swallowed rather than rolling back or failing the response.
pub(crate) async fn record_audit(
    pool: &PgPool,
    actor: ActorContext,
    entity_type: &'static str,
    entity_id: DbId,
    action: &'static str,
    metadata: Option<serde_json::Value>,
) {
    let input = CreateAuditEvent {
        entity_type: entity_type.to_string(),
        entity_id,
        action: action.to_string(),
        user_id: actor.user_id,
        metadata,
    };
    if let Err(err) = AuditEventRepo::append(pool, &input).await {
        tracing::error!(
            error = %err,
            entity_type,
            entity_id,
            action,
            "Audit event write failed"
        );
    }
}
