//! Actor identity extractor for Axum handlers.
//!
//! Authentication is mocked to a single static user; attribution still
//! flows through an explicit [`ActorContext`] on every mutating call so
//! that wiring in real auth later only touches this extractor. Callers may
//! override the actor with an `x-actor-id` header.

use atelier_core::actor::ActorContext;
use atelier_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Header a caller may use to attribute the request to a specific user.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The identity a mutating handler attributes its writes to.
///
/// Use this as an extractor parameter in any handler that records audit
/// events or authors comments:
///
/// ```ignore
/// async fn my_handler(actor: ActorUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = actor.user_id(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ActorUser(pub ActorContext);

impl ActorUser {
    /// The user id all writes in this request are attributed to.
    pub fn user_id(&self) -> DbId {
        self.0.user_id
    }

    /// The underlying actor context passed into audit writes.
    pub fn context(&self) -> ActorContext {
        self.0
    }
}

impl<S> FromRequestParts<S> for ActorUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = match parts.headers.get(ACTOR_HEADER) {
            Some(value) => {
                let user_id: DbId = value
                    .to_str()
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "Invalid {ACTOR_HEADER} header; expected a numeric user id"
                        ))
                    })?;
                ActorContext { user_id }
            }
            None => ActorContext::default_user(),
        };

        Ok(ActorUser(context))
    }
}
