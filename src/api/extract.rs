//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::UnitOfWork;

/// The user a request acts on behalf of.
///
/// Read from the configured identity header, falling back to
/// `identity.default_user_id` when the header is absent. No credentials are
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(pub i32);

/// Parses an acting-user header value.
pub fn parse_user_id(raw: &str) -> Result<i32, ApiError> {
    let id: i32 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("Invalid user id: {raw:?}")))?;

    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid user id: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

impl FromRequestParts<Arc<AppState>> for ActingUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let identity = &state.config.identity;

        let Some(value) = parts.headers.get(identity.header.as_str()) else {
            return Ok(Self(identity.default_user_id));
        };

        let raw = value
            .to_str()
            .map_err(|_| ApiError::validation("User id header is not valid text"))?;

        let id = parse_user_id(raw)?;
        tracing::Span::current().record("user_id", id);
        Ok(Self(id))
    }
}

/// Each handler gets its own transaction; it must finish it explicitly.
///
/// Safe methods get a read-only unit of work. Anything else waits for the
/// store's write gate first.
impl FromRequestParts<Arc<AppState>> for UnitOfWork {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let store = state.store();
        let uow = if parts.method.is_safe() {
            store.begin().await?
        } else {
            store.begin_write().await?
        };
        Ok(uow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("2").unwrap(), 2);
        assert_eq!(parse_user_id(" 15 ").unwrap(), 15);
        assert!(parse_user_id("0").is_err());
        assert!(parse_user_id("-4").is_err());
        assert!(parse_user_id("admin").is_err());
        assert!(parse_user_id("").is_err());
    }
}
