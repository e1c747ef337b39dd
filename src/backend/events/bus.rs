/**
 * Event Bus
 *
 * Handlers subscribe to an `EventKind`. Dispatch is synchronous with the
 * request: handlers run sequentially in subscription order and the first
 * failure stops the remaining handlers and is returned to the caller.
 * The store passed in is the transaction of the write that raised the
 * event, so a failure leaves nothing half applied.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::handlers::{LikeCounter, LikeNotifier, PostCounter, PostNotifier};
use super::{EventKind, ForumEvent};
use crate::backend::store::{Store, StoreError};

/// Reacts to a published [`ForumEvent`]
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, store: &dyn Store, event: &ForumEvent) -> Result<(), StoreError>;
}

/// Registry of event handlers keyed by event kind
#[derive(Default, Clone)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus with the counter and notification handlers subscribed
    pub fn with_default_handlers() -> Self {
        let mut bus = Self::new();
        let like_counter: Arc<dyn EventHandler> = Arc::new(LikeCounter);
        let post_counter: Arc<dyn EventHandler> = Arc::new(PostCounter);

        bus.subscribe(EventKind::LikeCreated, like_counter.clone());
        bus.subscribe(EventKind::LikeUpdated, like_counter);
        bus.subscribe(EventKind::LikeCreated, Arc::new(LikeNotifier));
        bus.subscribe(EventKind::PostCreated, post_counter.clone());
        bus.subscribe(EventKind::PostDeleted, post_counter);
        bus.subscribe(EventKind::PostCreated, Arc::new(PostNotifier));
        bus
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Run the handlers subscribed to the event's kind
    ///
    /// # Arguments
    ///
    /// * `store` - Store the handlers read from and write to
    /// * `event` - The published event
    ///
    /// # Returns
    ///
    /// The first handler error, if any
    pub async fn dispatch(&self, store: &dyn Store, event: &ForumEvent) -> Result<(), StoreError> {
        let Some(handlers) = self.handlers.get(&event.kind()) else {
            return Ok(());
        };

        tracing::debug!("[Events] Dispatching {:?} to {} handlers", event.kind(), handlers.len());
        for handler in handlers {
            if let Err(e) = handler.handle(store, event).await {
                tracing::error!("[Events] Handler failed for {:?}: {}", event.kind(), e);
                return Err(e);
            }
        }
        Ok(())
    }
}
