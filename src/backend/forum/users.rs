/**
 * User Handlers
 *
 * - `GET /api/users/{id}` - public profile
 * - `PUT /api/users/{id}` - edit profile (self or admin; `role` and
 *   `silenced` admin only)
 * - `DELETE /api/users/{id}` - admin only
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::require_admin;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::middleware::SessionUser;
use crate::backend::server::state::AppState;
use crate::backend::store::UserStore;
use crate::shared::forum::{PublicUser, UpdateUserRequest, User};

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>, BackendError> {
    let user = state.store.get_user(id).await.or_not_found("user not found")?;
    Ok(Json(PublicUser::from(&user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    SessionUser(caller): SessionUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, BackendError> {
    if !caller.can_modify(id) {
        return Err(BackendError::forbidden("not allowed to edit this user"));
    }
    if !caller.is_admin() && (request.role.is_some() || request.silenced.is_some()) {
        tracing::warn!("User {} tried to change role or silenced state", caller.id);
        return Err(BackendError::forbidden("admin only"));
    }

    let mut user = state.store.get_user(id).await.or_not_found("user not found")?;
    if let Some(nickname) = request.nickname {
        user.nickname = nickname.trim().to_string();
    }
    if let Some(avatar) = request.avatar {
        user.avatar = avatar;
    }
    if let Some(summary) = request.summary {
        user.summary = summary;
    }
    if let Some(role) = request.role {
        user.role = role;
    }
    if let Some(silenced) = request.silenced {
        user.silenced = silenced;
    }

    state.store.update_user(&user).await?;
    tracing::info!("User {} updated by {}", id, caller.id);
    Ok(Json(state.store.get_user(id).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    SessionUser(caller): SessionUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    require_admin(&caller)?;
    state.store.get_user(id).await.or_not_found("user not found")?;
    state.store.delete_user(id).await?;
    tracing::info!("User {} deleted by {}", id, caller.id);
    Ok(StatusCode::OK)
}
