/**
 * Server Configuration
 *
 * Opens the SQLite store named by the configuration. Unlike optional
 * services, the store is required: a connection or migration failure stops
 * startup.
 */

use std::sync::Arc;

use crate::backend::store::{SqliteStore, Store, StoreError};
use crate::shared::config::AppConfig;

/// Connect to the database and run migrations
///
/// # Arguments
///
/// * `config` - Application configuration holding `database_url`
///
/// # Returns
///
/// The store as a trait object ready for `AppState`
pub async fn load_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    tracing::info!("Connecting to database...");

    let store = SqliteStore::connect(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to open database: {:?}", e);
        e
    })?;

    tracing::info!("Database connected and migrations applied");
    Ok(Arc::new(store))
}
