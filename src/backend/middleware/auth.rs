/**
 * Authentication Extractors
 *
 * Handlers take `SessionUser` when a login is required and `MaybeUser` when
 * anonymous access is allowed. Both read `Authorization: Bearer <token>`,
 * verify the token and load the user from the store.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::{StoreError, UserStore};
use crate::shared::forum::User;

/// Logged-in user; rejects with 401 when there is no valid session
#[derive(Clone, Debug)]
pub struct SessionUser(pub User);

/// Optional session; anonymous requests pass with `None`
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn id(&self) -> i64 {
        self.0.as_ref().map_or(0, |user| user.id)
    }
}

/// Bearer token from the request, `Ok(None)` when the header is absent
fn bearer_token(parts: &Parts) -> Result<Option<&str>, BackendError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::unauthorized("invalid authorization header")
        })?;
    Ok(Some(token))
}

/// Resolve the session user, `Ok(None)` for anonymous requests
async fn load_session_user(parts: &Parts, state: &AppState) -> Result<Option<User>, BackendError> {
    let Some(token) = bearer_token(parts)? else {
        return Ok(None);
    };

    let claims = state.sessions.verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("invalid token")
    })?;
    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::unauthorized("invalid token")
    })?;

    match state.store.get_user(user_id).await {
        Ok(user) => Ok(Some(user)),
        Err(StoreError::NotFound) => {
            tracing::warn!("Token for unknown user {}", user_id);
            Err(BackendError::unauthorized("invalid token"))
        }
        Err(e) => Err(e.into()),
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        load_session_user(parts, state)
            .await?
            .map(SessionUser)
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                BackendError::unauthorized("login required")
            })
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(load_session_user(parts, state).await?))
    }
}
