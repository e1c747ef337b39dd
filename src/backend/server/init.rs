/**
 * Server Initialization
 *
 * 1. Open the store (connect + migrate)
 * 2. Build `AppState` with the default event handlers
 * 3. Create the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::events::EventBus;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::backend::store::{Store, StoreError};
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing forum backend server");

    let store = load_store(config).await?;
    let app = app_with_store(store, config);

    tracing::info!("Router configured");
    Ok(app)
}

/// Router over an already opened store
pub fn app_with_store(store: Arc<dyn Store>, config: &AppConfig) -> Router<()> {
    create_router(AppState::new(store, config))
}

/// Router over an already opened store with a custom set of event handlers
pub fn app_with_events(store: Arc<dyn Store>, config: &AppConfig, events: EventBus) -> Router<()> {
    create_router(AppState::with_events(store, config, events))
}
