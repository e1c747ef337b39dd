/**
 * Direct Message Handlers (session required)
 *
 * - `GET /api/chats` - the caller's conversations, latest message of each
 * - `POST /api/chats` - send a message (not silenced)
 * - `GET /api/chats/{uid}` - messages exchanged with user `uid`, newest first
 * - `PUT /api/chats/{uid}/read` - mark what `uid` sent the caller as read
 *
 * List endpoints accept `include=user`.
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use super::notifications::ReadResult;
use super::{attach_users, check_content, require_not_silenced};
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::middleware::SessionUser;
use crate::backend::server::state::AppState;
use crate::backend::store::{ChatStore, UserStore};
use crate::shared::forum::{ChatMessage, CreateChatRequest};
use crate::shared::pagination::has_more;
use crate::shared::{PageQuery, Payload};

async fn chat_page(
    state: &AppState,
    messages: Vec<ChatMessage>,
    size: i64,
    query: &PageQuery,
    viewer: i64,
) -> Result<Payload<Vec<ChatMessage>>, BackendError> {
    let mut payload = Payload::new(0, Vec::new()).with_more(has_more(messages.len(), size));
    if query.includes("user") {
        let ids = messages.iter().map(|m| m.peer_of(viewer));
        attach_users(state, ids, &mut payload).await?;
    }
    payload.data = messages;
    Ok(payload)
}

pub async fn get_chat_user_list(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<ChatMessage>>>, BackendError> {
    let (page, size) = query.page_size();
    let messages = state.store.get_chat_user_list(user.id, page, size).await?;
    Ok(Json(chat_page(&state, messages, size, &query, user.id).await?))
}

pub async fn get_chat_msg_list(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(peer): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Payload<Vec<ChatMessage>>>, BackendError> {
    let (page, size) = query.page_size();
    let messages = state.store.get_chat_msg_list(user.id, peer, page, size).await?;
    Ok(Json(chat_page(&state, messages, size, &query, user.id).await?))
}

/// Send a direct message
///
/// # Errors
///
/// * `400 Bad Request` - empty content, sensitive content or a message to oneself
/// * `403 Forbidden` - `!user silenced`
/// * `404 Not Found` - unknown recipient
pub async fn create_chat_message(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Json(request): Json<CreateChatRequest>,
) -> Result<Json<ChatMessage>, BackendError> {
    require_not_silenced(&user)?;
    check_content(&state, "content", &request.content)?;
    if request.to_id == user.id {
        return Err(BackendError::bad_request("cannot message yourself"));
    }
    state
        .store
        .get_user(request.to_id)
        .await
        .or_not_found("user not found")?;

    let mut message = ChatMessage::new(user.id, request.to_id, request.content);
    state.store.create_chat_message(&mut message).await?;
    tracing::debug!("Chat message {} from {} to {}", message.id, user.id, message.to_id);
    Ok(Json(message))
}

pub async fn mark_chat_read(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(peer): Path<i64>,
) -> Result<Json<ReadResult>, BackendError> {
    let updated = state.store.set_chat_msg_read(peer, user.id).await?;
    Ok(Json(ReadResult { updated }))
}
