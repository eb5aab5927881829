//! Caller identity for attribution of mutations.
//!
//! Authentication is out of scope for this service; every mutating call is
//! attributed to an [`ActorContext`] supplied by the caller instead of a
//! process-wide "current user". The HTTP layer resolves the actor from a
//! header and falls back to the static default user, so swapping in real
//! auth later only changes the extractor.

use crate::types::DbId;

/// User id every request is attributed to when the caller supplies none.
pub const DEFAULT_ACTOR_ID: DbId = 1;

/// Identity of the caller performing a mutation.
///
/// Passed explicitly into every state-changing operation and recorded on
/// each audit event and comment.
#[derive(Debug, Clone, Copy)]
pub struct ActorContext {
    pub user_id: DbId,
}

impl ActorContext {
    /// The static default actor used while authentication is mocked.
    pub fn default_user() -> Self {
        Self {
            user_id: DEFAULT_ACTOR_ID,
        }
    }
}

impl Default for ActorContext {
    fn default() -> Self {
        Self::default_user()
    }
}
