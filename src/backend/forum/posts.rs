/**
 * Post Handlers
 *
 * - `GET /api/discussions/{id}/posts` - posts of a discussion, oldest first
 * - `GET /api/posts/{id}` - single post
 * - `POST /api/posts` - create (session, not silenced)
 * - `PUT /api/posts/{id}` - rewrite content (admin)
 * - `DELETE /api/posts/{id}` - delete (admin or author)
 * - `GET /api/users/{id}/posts` - posts by a user, `0` for the caller
 *
 * Read endpoints accept `include=user,like`.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use super::{attach_post_entities, check_content, require_admin, require_not_silenced, resolve_user};
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::events::ForumEvent;
use crate::backend::middleware::{MaybeUser, SessionUser};
use crate::backend::server::state::AppState;
use crate::backend::store::{DiscussionStore, PostStore, UserStore};
use crate::shared::forum::{CreatePostRequest, Post, UpdatePostRequest};
use crate::shared::pagination::has_more;
use crate::shared::{PageQuery, Payload};

/// Build a post list payload with `has_more` and the requested includes
async fn post_page(
    state: &AppState,
    posts: Vec<Post>,
    size: i64,
    query: &PageQuery,
    viewer: i64,
) -> Result<Payload<Vec<Post>>, BackendError> {
    let more = has_more(posts.len(), size);
    let mut payload = Payload::new(0, Vec::new()).with_more(more);
    attach_post_entities(
        state,
        &posts,
        query.includes("user"),
        query.includes("like"),
        viewer,
        &mut payload,
    )
    .await?;
    payload.data = posts;
    Ok(payload)
}

pub async fn get_post_list(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(discussion_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<Post>>>, BackendError> {
    let (page, size) = query.page_size();
    let posts = state.store.get_post_list(discussion_id, page, size).await?;
    Ok(Json(post_page(&state, posts, size, &query, viewer.id()).await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Post>>, BackendError> {
    let post = state.store.get_post(id).await?;

    let mut payload = Payload::new(0, post);
    let posts = [payload.data.clone()];
    attach_post_entities(
        &state,
        &posts,
        query.includes("user"),
        query.includes("like"),
        viewer.id(),
        &mut payload,
    )
    .await?;
    Ok(Json(payload))
}

/// Create a post
///
/// Members always post as themselves. Admins may post on behalf of
/// `author_id`, which defaults to the admin when 0.
///
/// # Errors
///
/// * `400 Bad Request` - empty content or `4001:sensitive content!`
/// * `403 Forbidden` - `!user silenced`
/// * `404 Not Found` - unknown discussion, author or replied-to user
pub async fn create_post(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    require_not_silenced(&user)?;

    let author_id = if user.is_admin() && request.author_id > 0 {
        state.store.get_user(request.author_id).await.or_not_found("user not found")?;
        request.author_id
    } else {
        user.id
    };

    check_content(&state, "content", &request.content)?;
    state
        .store
        .get_discussion(request.discussion_id)
        .await
        .or_not_found("discussion not found")?;

    let reply_id = request.reply_id.max(0);
    if reply_id > 0 {
        state.store.get_user(reply_id).await.or_not_found("reply user not found")?;
    }

    let mut post = Post::new(request.discussion_id, author_id, request.content).with_reply(reply_id);
    let tx = state.begin().await?;
    tx.create_post(&mut post).await?;
    state.publish(tx, ForumEvent::PostCreated(post.clone())).await?;
    tracing::info!("Post {} created in discussion {} by {}", post.id, post.discussion_id, author_id);
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    require_admin(&user)?;
    check_content(&state, "content", &request.content)?;

    let mut post = state.store.get_post(id).await?;
    post.content = request.content;
    state.store.update_post(&post).await?;
    Ok(Json(state.store.get_post(id).await?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    let post = state.store.get_post(id).await?;
    if !user.can_modify(post.author_id) {
        return Err(BackendError::forbidden("not allowed to delete this post"));
    }

    let tx = state.begin().await?;
    tx.delete_post(id).await?;
    state.publish(tx, ForumEvent::PostDeleted(post)).await?;
    tracing::info!("Post {} deleted by {}", id, user.id);
    Ok(StatusCode::OK)
}

pub async fn get_user_posts(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<Post>>>, BackendError> {
    let viewer_id = viewer.id();
    let user = resolve_user(&state, id, viewer).await?;

    let (page, size) = query.page_size();
    let posts = state.store.get_post_list_user(user.id, page, size).await?;
    Ok(Json(post_page(&state, posts, size, &query, viewer_id).await?))
}
