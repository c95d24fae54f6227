//! `Actor` extractor: resolves the acting user from the `X-User-Id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use katla_core::error::AppError;
use katla_core::types::UserId;
use katla_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the acting user's numeric ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Request context for the acting user.
///
/// Requests without the header act as `identity.default_user_id`.
#[derive(Debug, Clone)]
pub struct Actor(pub RequestContext);

impl std::ops::Deref for Actor {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|v| v.parse::<UserId>().ok())
                .ok_or_else(|| AppError::validation("Invalid X-User-Id header"))?,
            None => UserId(state.config.identity.default_user_id),
        };

        Ok(Actor(RequestContext::new(user_id)))
    }
}
