//! Forum HTTP Handlers
//!
//! One submodule per resource. Handlers take `AppState`, a session
//! extractor (`SessionUser` or `MaybeUser`) and the request parts they need,
//! and return `Result<_, BackendError>`.
//!
//! List endpoints answer with a [`Payload`] envelope. `include=user` attaches
//! `entities.users` (user id -> public user) and, for posts, `include=like`
//! attaches `entities.likes` (post id -> post id for posts the caller likes).

pub mod admin;
pub mod chats;
pub mod discussions;
pub mod likes;
pub mod meta;
pub mod notifications;
pub mod posts;
pub mod reports;
pub mod tags;
pub mod users;

use std::collections::BTreeMap;

use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::middleware::MaybeUser;
use crate::backend::server::state::AppState;
use crate::backend::spam::SENSITIVE_CONTENT;
use crate::backend::store::{LikeStore, UserStore};
use crate::shared::forum::{Post, PublicUser, User};
use crate::shared::Payload;

pub const USER_SILENCED: &str = "!user silenced";

pub(crate) fn require_admin(user: &User) -> Result<(), BackendError> {
    if user.is_admin() {
        Ok(())
    } else {
        tracing::warn!("Admin action refused for user {}", user.id);
        Err(BackendError::forbidden("admin only"))
    }
}

pub(crate) fn require_not_silenced(user: &User) -> Result<(), BackendError> {
    if !user.is_admin() && user.is_silenced() {
        tracing::warn!("Silenced user {} tried to write", user.id);
        return Err(BackendError::forbidden(USER_SILENCED));
    }
    Ok(())
}

/// Reject empty text and text caught by the content filter
pub(crate) fn check_content(state: &AppState, field: &str, text: &str) -> Result<(), BackendError> {
    if text.trim().is_empty() {
        return Err(BackendError::bad_request(format!("{} cannot be empty", field)));
    }
    if !state.content_filter.validate(text) {
        return Err(BackendError::bad_request(SENSITIVE_CONTENT));
    }
    Ok(())
}

/// The user addressed by a `/users/{id}/...` path, where `0` means the caller
pub(crate) async fn resolve_user(state: &AppState, id: i64, viewer: MaybeUser) -> Result<User, BackendError> {
    if id == 0 {
        return viewer
            .0
            .ok_or_else(|| BackendError::unauthorized("login required"));
    }
    state.store.get_user(id).await.or_not_found("user not found")
}

/// Attach `entities.users` for `ids`
pub(crate) async fn attach_users<T>(
    state: &AppState,
    ids: impl IntoIterator<Item = i64>,
    payload: &mut Payload<T>,
) -> Result<(), BackendError> {
    let ids: Vec<i64> = ids.into_iter().collect();
    let users = state.store.get_user_list_by_ids(&ids).await?;
    let table: BTreeMap<i64, PublicUser> = users.iter().map(|u| (u.id, PublicUser::from(u))).collect();
    payload.attach("users", table)?;
    Ok(())
}

/// Apply the `user` and `like` includes to a payload of posts
pub(crate) async fn attach_post_entities<T>(
    state: &AppState,
    posts: &[Post],
    include_users: bool,
    include_likes: bool,
    viewer: i64,
    payload: &mut Payload<T>,
) -> Result<(), BackendError> {
    if include_users {
        let ids = posts.iter().flat_map(|p| [p.author_id, p.reply_id]);
        attach_users(state, ids, payload).await?;
    }
    if include_likes {
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let liked = state.store.get_like_post_list(viewer, &ids).await?;
        let table: BTreeMap<i64, i64> = liked.into_iter().map(|id| (id, id)).collect();
        payload.attach("likes", table)?;
    }
    Ok(())
}
