/**
 * Like Handlers
 *
 * - `GET /api/posts/{id}/likes` - active likes of a post
 * - `POST /api/posts/{id}/likes` - like the post
 * - `DELETE /api/posts/{id}/likes` - withdraw the like
 * - `GET /api/users/{id}/likes` - likes by a user, `0` for the caller
 *
 * A (post, user) pair has at most one row. Liking creates it
 * (`LikeCreated`) or reactivates a withdrawn one (`LikeUpdated`); liking
 * twice returns the row unchanged without an event.
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use super::{attach_users, resolve_user};
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::events::ForumEvent;
use crate::backend::middleware::{MaybeUser, SessionUser};
use crate::backend::server::state::AppState;
use crate::backend::store::{LikeStore, PostStore, StoreError};
use crate::shared::forum::{Like, LikeStatus};
use crate::shared::pagination::has_more;
use crate::shared::{PageQuery, Payload};

async fn like_page(
    state: &AppState,
    likes: Vec<Like>,
    size: i64,
    query: &PageQuery,
) -> Result<Payload<Vec<Like>>, BackendError> {
    let mut payload = Payload::new(0, Vec::new()).with_more(has_more(likes.len(), size));
    if query.includes("user") {
        let ids = likes.iter().map(|l| l.user_id);
        attach_users(state, ids, &mut payload).await?;
    }
    payload.data = likes;
    Ok(payload)
}

pub async fn get_like_list(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<Like>>>, BackendError> {
    let (page, size) = query.page_size();
    let likes = state.store.get_like_list(post_id, page, size).await?;
    Ok(Json(like_page(&state, likes, size, &query).await?))
}

pub async fn create_like(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(post_id): Path<i64>,
) -> Result<Json<Like>, BackendError> {
    state.store.get_post(post_id).await.or_not_found("post not found")?;

    match state.store.get_like(post_id, user.id).await {
        Ok(like) if like.is_active() => Ok(Json(like)),
        Ok(mut like) => {
            like.set_status(LikeStatus::Active);
            let tx = state.begin().await?;
            tx.update_like(&like).await?;
            state.publish(tx, ForumEvent::LikeUpdated(like.clone())).await?;
            Ok(Json(like))
        }
        Err(StoreError::NotFound) => {
            let mut like = Like::new(post_id, user.id);
            let tx = state.begin().await?;
            tx.create_like(&mut like).await?;
            state.publish(tx, ForumEvent::LikeCreated(like.clone())).await?;
            tracing::debug!("User {} liked post {}", user.id, post_id);
            Ok(Json(like))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_like(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(post_id): Path<i64>,
) -> Result<Json<Like>, BackendError> {
    let mut like = state
        .store
        .get_like(post_id, user.id)
        .await
        .or_not_found("like not found")?;
    if !like.is_active() {
        return Err(BackendError::not_found("like not found"));
    }

    like.set_status(LikeStatus::Withdrawn);
    let tx = state.begin().await?;
    tx.update_like(&like).await?;
    state.publish(tx, ForumEvent::LikeUpdated(like.clone())).await?;
    Ok(Json(like))
}

pub async fn get_user_likes(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<Like>>>, BackendError> {
    let user = resolve_user(&state, id, viewer).await?;
    let (page, size) = query.page_size();
    let likes = state.store.get_like_list_user(user.id, page, size).await?;
    Ok(Json(like_page(&state, likes, size, &query).await?))
}
