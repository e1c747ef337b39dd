/**
 * Tag Handlers
 *
 * - `GET /api/tags` - all tags
 * - `GET /api/tags/{tag}/discussions` - discussions carrying the tag text
 * - `POST /api/tags`, `PUT /api/tags/{tag}`, `DELETE /api/tags/{tag}` -
 *   admin only, `{tag}` is the numeric id
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use super::discussions::discussion_page;
use super::require_admin;
use crate::backend::error::BackendError;
use crate::backend::middleware::SessionUser;
use crate::backend::server::state::AppState;
use crate::backend::store::TagStore;
use crate::shared::forum::{CreateTagRequest, Discussion, Tag, UpdateTagRequest};
use crate::shared::{PageQuery, Payload};

fn tag_text(text: &str) -> Result<String, BackendError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(BackendError::bad_request("tag cannot be empty"));
    }
    Ok(text.to_string())
}

pub async fn get_tag_list(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, BackendError> {
    Ok(Json(state.store.get_tag_list().await?))
}

pub async fn get_tag_discussions(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<Discussion>>>, BackendError> {
    let (page, size) = query.page_size();
    let discussions = state.store.get_discussions_by_tag(tag.trim(), page, size).await?;
    Ok(Json(discussion_page(&state, discussions, size, &query).await?))
}

pub async fn create_tag(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Json(request): Json<CreateTagRequest>,
) -> Result<Json<Tag>, BackendError> {
    require_admin(&user)?;
    let text = tag_text(&request.text)?;
    let tag = state.store.create_tag(&text, &request.summary).await?;
    tracing::info!("Tag {} created by {}", tag.text, user.id);
    Ok(Json(tag))
}

pub async fn update_tag(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTagRequest>,
) -> Result<Json<Tag>, BackendError> {
    require_admin(&user)?;
    let mut tag = state.store.get_tag(id).await?;
    if let Some(text) = request.text {
        tag.text = tag_text(&text)?;
    }
    if let Some(summary) = request.summary {
        tag.summary = summary;
    }
    state.store.update_tag(&tag).await?;
    Ok(Json(tag))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    require_admin(&user)?;
    state.store.get_tag(id).await?;
    state.store.delete_tag(id).await?;
    tracing::info!("Tag {} deleted by {}", id, user.id);
    Ok(StatusCode::OK)
}
