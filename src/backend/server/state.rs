/**
 * Application State Management
 *
 * `AppState` is cloned into every handler. Everything in it is behind an
 * `Arc` (or `Copy`), so cloning is cheap and shares one store, one event
 * bus and one set of signing keys across requests.
 *
 * Writes that raise a `ForumEvent` go through a transaction:
 *
 * ```text
 * let tx = state.begin().await?;
 * tx.create_post(&mut post).await?;
 * state.publish(tx, ForumEvent::PostCreated(post.clone())).await?;
 * ```
 *
 * `publish` commits only when every handler succeeded, so the write and
 * its counters and notifications land together or not at all.
 */

use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::BackendError;
use crate::backend::events::{EventBus, ForumEvent};
use crate::backend::spam::ContentFilter;
use crate::backend::store::{Store, TransactionStore};
use crate::shared::config::AppConfig;

/// Shared state for the forum HTTP API
///
/// # Fields
///
/// * `store` - Persistence for every forum entity
/// * `events` - Handlers run after forum writes
/// * `sessions` - JWT signing keys
/// * `passwords` - bcrypt with the configured cost
/// * `content_filter` - Sensitive word list for posts and discussions
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub events: Arc<EventBus>,
    pub sessions: Arc<SessionKeys>,
    pub passwords: PasswordHasher,
    pub content_filter: Arc<ContentFilter>,
}

impl AppState {
    /// State with the default event handlers subscribed
    pub fn new(store: Arc<dyn Store>, config: &AppConfig) -> Self {
        Self::with_events(store, config, EventBus::with_default_handlers())
    }

    pub fn with_events(store: Arc<dyn Store>, config: &AppConfig, events: EventBus) -> Self {
        Self {
            store,
            events: Arc::new(events),
            sessions: Arc::new(SessionKeys::new(&config.jwt_secret, config.token_ttl_days)),
            passwords: PasswordHasher::new(config.bcrypt_cost),
            content_filter: Arc::new(ContentFilter::new(&config.sensitive_words)),
        }
    }

    /// Open a transaction for a write that will be published
    pub async fn begin(&self) -> Result<Box<dyn Store>, BackendError> {
        Ok(self.store.begin().await?)
    }

    /// Dispatch `event` inside `tx` and commit it
    ///
    /// A failing handler drops `tx` uncommitted, rolling back the write.
    pub async fn publish(&self, tx: Box<dyn Store>, event: ForumEvent) -> Result<(), BackendError> {
        self.events.dispatch(tx.as_ref(), &event).await?;
        tx.commit().await?;
        Ok(())
    }
}
