/**
 * Notification Handlers (session required)
 *
 * - `GET /api/notifications/count` - unread counts per kind
 * - `GET /api/notifications?kind=` - caller's notifications of one kind
 * - `PUT /api/notifications/{id}/read` - mark one read
 * - `PUT /api/notifications/read?kind=` - mark a kind read
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::attach_users;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::middleware::SessionUser;
use crate::backend::server::state::AppState;
use crate::backend::store::NotificationStore;
use crate::shared::forum::{Notification, NotificationCount, NotificationKind};
use crate::shared::pagination::has_more;
use crate::shared::{PageQuery, Payload};

#[derive(Debug, Default, Deserialize)]
pub struct KindQuery {
    pub kind: Option<String>,
}

impl KindQuery {
    fn parse(&self) -> Result<NotificationKind, BackendError> {
        let kind = self.kind.as_deref().unwrap_or_default();
        NotificationKind::from_name(kind)
            .ok_or_else(|| BackendError::bad_request(format!("unknown notification kind '{}'", kind)))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadResult {
    pub updated: u64,
}

pub async fn get_notification_count(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<NotificationCount>, BackendError> {
    Ok(Json(state.store.get_notification_count(user.id).await?))
}

pub async fn get_notification_list(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<PageQuery>,
    Query(kind): Query<KindQuery>,
) -> Result<Json<Payload<Vec<Notification>>>, BackendError> {
    let kind = kind.parse()?;
    let (page, size) = query.page_size();
    let notifications = state.store.get_notification_list(user.id, kind, page, size).await?;

    let mut payload = Payload::new(0, Vec::new()).with_more(has_more(notifications.len(), size));
    if query.includes("user") {
        let ids = notifications.iter().map(|n| n.from_id);
        attach_users(&state, ids, &mut payload).await?;
    }
    payload.data = notifications;
    Ok(Json(payload))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    state
        .store
        .set_notification_read(user.id, id)
        .await
        .or_not_found("notification not found")?;
    Ok(StatusCode::OK)
}

pub async fn mark_kind_read(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Query(kind): Query<KindQuery>,
) -> Result<Json<ReadResult>, BackendError> {
    let kind = kind.parse()?;
    let updated = state.store.set_notification_read_kind(user.id, kind).await?;
    Ok(Json(ReadResult { updated }))
}
