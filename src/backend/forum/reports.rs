/**
 * Report Handlers
 *
 * - `POST /api/reports` - report a discussion or post (session)
 * - `GET /api/reports/{id}` - admin only
 * - `PUT /api/reports/{id}` - change status, admin only
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use super::require_admin;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::middleware::SessionUser;
use crate::backend::server::state::AppState;
use crate::backend::store::{DiscussionStore, PostStore, ReportStore};
use crate::shared::forum::{CreateReportRequest, EntityType, Report, UpdateReportRequest};

pub async fn create_report(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Json(request): Json<CreateReportRequest>,
) -> Result<Json<Report>, BackendError> {
    let reason = request.reason.trim();
    if reason.is_empty() {
        return Err(BackendError::bad_request("reason cannot be empty"));
    }

    match request.entity_type {
        EntityType::Discussion => {
            state
                .store
                .get_discussion(request.entity_id)
                .await
                .or_not_found("discussion not found")?;
        }
        EntityType::Post => {
            state.store.get_post(request.entity_id).await.or_not_found("post not found")?;
        }
    }

    let mut report = Report::new(user.id, request.entity_type, request.entity_id, reason);
    state.store.create_report(&mut report).await?;
    tracing::info!(
        "Report {} filed by {} against {:?} {}",
        report.id,
        user.id,
        report.entity_type,
        report.entity_id
    );
    Ok(Json(report))
}

pub async fn get_report(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<Report>, BackendError> {
    require_admin(&user)?;
    Ok(Json(state.store.get_report(id).await?))
}

pub async fn update_report(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateReportRequest>,
) -> Result<Json<Report>, BackendError> {
    require_admin(&user)?;
    let mut report = state.store.get_report(id).await?;
    report.status = request.status;
    state.store.update_report(&report).await?;
    Ok(Json(state.store.get_report(id).await?))
}
