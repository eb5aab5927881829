use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every variant is raised synchronously from the mutating call that caused
/// it; none of them is retried automatically. The API layer translates each
/// into a structured HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Referential integrity: {0}")]
    ReferentialIntegrity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
