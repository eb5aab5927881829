//! Sample-request lifecycle state machine.
//!
//! Defines the request statuses, the allowed-transition table, and the
//! stamp-once timestamp policy. The transition table is authoritative: the
//! API layer rejects any status write whose target is not reachable from
//! the current status.

use crate::catalog::string_enum;
use crate::error::CoreError;

string_enum! {
    /// Lifecycle status of a sample request.
    RequestStatus, "request status" {
        Requested => "REQUESTED",
        Approved => "APPROVED",
        Shipped => "SHIPPED",
        HandedOff => "HANDED_OFF",
        InUse => "IN_USE",
        Returned => "RETURNED",
        Closed => "CLOSED",
    }
}

impl RequestStatus {
    /// Statuses this status may transition to. CLOSED is terminal.
    pub fn allowed_transitions(self) -> &'static [RequestStatus] {
        use RequestStatus::*;
        match self {
            Requested => &[Approved, Closed],
            Approved => &[Shipped, HandedOff, Closed],
            Shipped => &[HandedOff, InUse, Returned, Closed],
            HandedOff => &[InUse, Returned, Closed],
            InUse => &[Returned, Closed],
            Returned => &[Closed],
            Closed => &[],
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Column stamped the first time a request enters this status.
    ///
    /// `requested_at` is set at creation and IN_USE carries no timestamp,
    /// so both map to `None` here. The repository applies the stamp as
    /// `COALESCE(col, now())` so re-entry never overwrites history.
    pub fn stamp_column(self) -> Option<&'static str> {
        use RequestStatus::*;
        match self {
            Requested | InUse => None,
            Approved => Some("approved_at"),
            Shipped => Some("shipped_at"),
            HandedOff => Some("handed_off_at"),
            Returned => Some("returned_at"),
            Closed => Some("closed_at"),
        }
    }
}

/// Maximum quantity a single request may claim.
pub const MAX_REQUEST_QUANTITY: i32 = 10_000;

/// Validate a requested quantity: at least 1, within the sanity cap.
pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(
            "Request quantity must be at least 1".to_string(),
        ));
    }
    if quantity > MAX_REQUEST_QUANTITY {
        return Err(CoreError::Validation(format!(
            "Request quantity exceeds maximum of {MAX_REQUEST_QUANTITY}"
        )));
    }
    Ok(())
}

/// Validate that a status transition from `current` to `next` is allowed.
///
/// Writing the current status back (a manual correction) is not a
/// transition and is not validated here.
pub fn validate_transition(current: RequestStatus, next: RequestStatus) -> Result<(), CoreError> {
    let allowed = current.allowed_transitions();
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition request from '{}' to '{}'. Allowed transitions: [{}]",
            current,
            next,
            allowed
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}
