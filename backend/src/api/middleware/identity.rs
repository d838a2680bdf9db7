//! Caller identity from request headers.
//!
//! `X-User-Id`, `X-User-Name` and `X-User-Role` describe who is acting. They
//! are trusted as sent: this states policy for the workflow rules, it does
//! not authenticate anyone.

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::error::{AppError, Result};
use crate::models::{Actor, UserRole};

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_NAME_HEADER: &str = "X-User-Name";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

/// Actor described by the identity headers, if id and role are usable.
pub fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let id = header(USER_ID_HEADER)?;
    let role = match header(USER_ROLE_HEADER)?.parse::<UserRole>() {
        Ok(role) => role,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring identity with unknown role");
            return None;
        }
    };
    let name = header(USER_NAME_HEADER).unwrap_or(id);

    Some(Actor::new(id, name, role))
}

/// Inserts `Option<Actor>` into request extensions.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let actor = actor_from_headers(request.headers());
    if let Some(actor) = &actor {
        tracing::Span::current().record("user_id", actor.id.as_str());
    }
    request.extensions_mut().insert(actor);
    next.run(request).await
}

/// The acting identity, or 401.
pub fn require_actor(actor: Option<Actor>) -> Result<Actor> {
    actor.ok_or_else(|| {
        AppError::Authentication("X-User-Id and X-User-Role headers are required".to_string())
    })
}
