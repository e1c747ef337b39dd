/**
 * Site Settings Handlers
 *
 * - `GET /api/meta` - every setting as a `{ key: value }` object
 * - `GET /api/meta/{key}` - one setting, 404 when unset
 * - `PUT /api/admin/meta` - insert or overwrite the given settings (admin)
 */

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::require_admin;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::middleware::SessionUser;
use crate::backend::server::state::AppState;
use crate::backend::store::MetaStore;

/// Longest accepted setting key
pub const MAX_META_KEY_LEN: usize = 64;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetaValue {
    pub key: String,
    pub value: String,
}

fn validate_keys(data: &BTreeMap<String, String>) -> Result<(), BackendError> {
    if data.is_empty() {
        return Err(BackendError::bad_request("no settings given"));
    }
    match data
        .keys()
        .find(|key| key.trim().is_empty() || key.len() > MAX_META_KEY_LEN || key.trim() != key.as_str())
    {
        Some(key) => Err(BackendError::bad_request(format!("invalid setting key '{}'", key))),
        None => Ok(()),
    }
}

pub async fn get_meta_data(State(state): State<AppState>) -> Result<Json<BTreeMap<String, String>>, BackendError> {
    Ok(Json(state.store.get_meta_data().await?))
}

pub async fn get_meta_value(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MetaValue>, BackendError> {
    let value = state
        .store
        .get_meta_value(&key)
        .await
        .or_not_found("setting not found")?;
    Ok(Json(MetaValue { key, value }))
}

pub async fn put_meta_data(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Json(data): Json<BTreeMap<String, String>>,
) -> Result<Json<BTreeMap<String, String>>, BackendError> {
    require_admin(&user)?;
    validate_keys(&data)?;

    state.store.put_meta_data(&data).await?;
    tracing::info!("Admin {} updated {} settings", user.id, data.len());
    Ok(Json(state.store.get_meta_data().await?))
}
