//! Audit trail constants and metadata helpers.
//!
//! This module lives in `core` (zero internal deps) so both the repository
//! and API layers agree on the entity-type tags and action names written
//! to the append-only trail.

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known actions for audit events.
pub mod actions {
    pub const CREATED: &str = "CREATED";
    pub const UPDATED: &str = "UPDATED";
    pub const DELETED: &str = "DELETED";
    pub const STATUS_CHANGED: &str = "STATUS_CHANGED";
}

// ---------------------------------------------------------------------------
// Entity type tags
// ---------------------------------------------------------------------------

/// Entity-type tags keying the trail. One tag per auditable entity.
pub mod entity_types {
    pub const PRODUCTION_ITEM: &str = "PRODUCTION_ITEM";
    pub const SAMPLE_ITEM: &str = "SAMPLE_ITEM";
    pub const INVENTORY_UNIT: &str = "INVENTORY_UNIT";
    pub const TEAM: &str = "TEAM";
    pub const SAMPLE_REQUEST: &str = "SAMPLE_REQUEST";
    pub const COMMENT: &str = "COMMENT";
}

/// All known entity-type tags.
pub const ALL_ENTITY_TYPES: &[&str] = &[
    entity_types::PRODUCTION_ITEM,
    entity_types::SAMPLE_ITEM,
    entity_types::INVENTORY_UNIT,
    entity_types::TEAM,
    entity_types::SAMPLE_REQUEST,
    entity_types::COMMENT,
];

/// Whether a tag is a known entity type.
pub fn is_known_entity_type(tag: &str) -> bool {
    ALL_ENTITY_TYPES.contains(&tag)
}

// ---------------------------------------------------------------------------
// Metadata helpers
// ---------------------------------------------------------------------------

/// Metadata payload for a STATUS_CHANGED event.
pub fn status_change_metadata(from: &str, to: &str) -> serde_json::Value {
    serde_json::json!({ "from": from, "to": to })
}

/// Metadata payload for an UPDATED event: the names of the changed fields.
pub fn changed_fields_metadata(fields: &[&str]) -> serde_json::Value {
    serde_json::json!({ "changed_fields": fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_tags_are_recognised() {
        for tag in ALL_ENTITY_TYPES {
            assert!(is_known_entity_type(tag));
        }
        assert!(!is_known_entity_type("WIDGET"));
        assert!(!is_known_entity_type(""));
    }

    #[test]
    fn status_change_metadata_carries_from_and_to() {
        let meta = status_change_metadata("REQUESTED", "APPROVED");
        assert_eq!(meta["from"], "REQUESTED");
        assert_eq!(meta["to"], "APPROVED");
    }

    #[test]
    fn changed_fields_metadata_lists_fields() {
        let meta = changed_fields_metadata(&["quantity", "notes"]);
        assert_eq!(meta["changed_fields"][0], "quantity");
        assert_eq!(meta["changed_fields"][1], "notes");
    }
}
