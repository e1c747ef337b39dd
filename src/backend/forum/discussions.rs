/**
 * Discussion Handlers
 *
 * - `GET /api/discussions?filter=latest|hot|unanswered` - list
 * - `GET /api/discussions/{id}` - single discussion
 * - `POST /api/discussions` - create, linking `tags` (session, not silenced)
 * - `PUT /api/discussions/{id}` - edit title/content (author or admin)
 * - `DELETE /api/discussions/{id}` - delete with its posts (author or admin)
 * - `GET /api/users/{id}/discussions` - by author, `0` for the caller
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use super::{attach_users, require_not_silenced, resolve_user};
use crate::backend::error::BackendError;
use crate::backend::events::ForumEvent;
use crate::backend::middleware::{MaybeUser, SessionUser};
use crate::backend::server::state::AppState;
use crate::backend::spam::SENSITIVE_CONTENT;
use crate::backend::store::{DiscussionStore, TagStore};
use crate::shared::forum::discussion::validate_title;
use crate::shared::forum::{CreateDiscussionRequest, Discussion, UpdateDiscussionRequest};
use crate::shared::pagination::has_more;
use crate::shared::{PageQuery, Payload};

#[derive(Debug, Default, Deserialize)]
pub struct ListFilter {
    pub filter: Option<String>,
}

/// Payload for a page of discussions, authors attached on `include=user`
pub(crate) async fn discussion_page(
    state: &AppState,
    discussions: Vec<Discussion>,
    size: i64,
    query: &PageQuery,
) -> Result<Payload<Vec<Discussion>>, BackendError> {
    let more = has_more(discussions.len(), size);
    let mut payload = Payload::new(0, Vec::new()).with_more(more);
    if query.includes("user") {
        let ids = discussions.iter().map(|d| d.author_id);
        attach_users(state, ids, &mut payload).await?;
    }
    payload.data = discussions;
    Ok(payload)
}

fn check_discussion_text(state: &AppState, title: &str, content: &str) -> Result<(), BackendError> {
    if !state.content_filter.validate(title) || !state.content_filter.validate(content) {
        return Err(BackendError::bad_request(SENSITIVE_CONTENT));
    }
    Ok(())
}

pub async fn get_discussion_list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<Payload<Vec<Discussion>>>, BackendError> {
    let (page, size) = query.page_size();
    let filter = filter.filter.unwrap_or_default();
    let discussions = state.store.get_discussion_list(page, size, &filter).await?;
    Ok(Json(discussion_page(&state, discussions, size, &query).await?))
}

pub async fn get_discussion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Discussion>>, BackendError> {
    let discussion = state.store.get_discussion(id).await?;
    let author_id = discussion.author_id;

    let mut payload = Payload::new(0, discussion);
    if query.includes("user") {
        attach_users(&state, [author_id], &mut payload).await?;
    }
    Ok(Json(payload))
}

/// Create a discussion
///
/// # Errors
///
/// * `400 Bad Request` - bad title or `4001:sensitive content!`
/// * `403 Forbidden` - `!user silenced`
pub async fn create_discussion(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Json(request): Json<CreateDiscussionRequest>,
) -> Result<Json<Discussion>, BackendError> {
    require_not_silenced(&user)?;
    request.validate()?;
    check_discussion_text(&state, &request.title, &request.content)?;

    let mut discussion = Discussion::new(user.id, request.title.trim(), request.content);
    let tx = state.begin().await?;
    tx.create_discussion(&mut discussion).await?;
    tx.link_tag_discussion(discussion.id, &request.tags).await?;
    state.publish(tx, ForumEvent::DiscussionCreated(discussion.clone())).await?;
    tracing::info!("Discussion {} created by {}", discussion.id, user.id);
    Ok(Json(discussion))
}

pub async fn update_discussion(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDiscussionRequest>,
) -> Result<Json<Discussion>, BackendError> {
    let mut discussion = state.store.get_discussion(id).await?;
    if !user.can_modify(discussion.author_id) {
        return Err(BackendError::forbidden("not allowed to edit this discussion"));
    }

    if let Some(title) = request.title {
        validate_title(&title)?;
        discussion.title = title.trim().to_string();
    }
    if let Some(content) = request.content {
        discussion.content = content;
    }
    check_discussion_text(&state, &discussion.title, &discussion.content)?;

    state.store.update_discussion(&discussion).await?;
    Ok(Json(state.store.get_discussion(id).await?))
}

pub async fn delete_discussion(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    let discussion = state.store.get_discussion(id).await?;
    if !user.can_modify(discussion.author_id) {
        return Err(BackendError::forbidden("not allowed to delete this discussion"));
    }

    let tx = state.begin().await?;
    tx.delete_discussion(id).await?;
    state.publish(tx, ForumEvent::DiscussionDeleted(discussion)).await?;
    tracing::info!("Discussion {} deleted by {}", id, user.id);
    Ok(StatusCode::OK)
}

pub async fn get_user_discussions(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<Discussion>>>, BackendError> {
    let user = resolve_user(&state, id, viewer).await?;
    let (page, size) = query.page_size();
    let discussions = state.store.get_discussion_list_user(user.id, page, size).await?;
    Ok(Json(discussion_page(&state, discussions, size, &query).await?))
}
