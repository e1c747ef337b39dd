//! In-process forum events
//!
//! Handlers that change forum state publish a [`ForumEvent`] inside the
//! transaction of the primary write. The [`EventBus`] runs every handler
//! subscribed to that event's [`EventKind`], one after another, and the
//! transaction commits only if all of them succeed.
//!
//! # Module Structure
//!
//! ```text
//! events/
//! ├── mod.rs      - Event types
//! ├── bus.rs      - Subscription and dispatch
//! └── handlers.rs - Counter and notification handlers
//! ```
//!
//! # Default handlers
//!
//! | Event | Effect |
//! |---|---|
//! | `LikeCreated` | post `like_count + 1`, notify the post author |
//! | `LikeUpdated` | post `like_count` up or down with the like status |
//! | `PostCreated` | discussion `comment_count + 1`, notify discussion author and reply target |
//! | `PostDeleted` | discussion `comment_count - 1` |

pub mod bus;
pub mod handlers;

pub use bus::{EventBus, EventHandler};
pub use handlers::{LikeCounter, LikeNotifier, PostCounter, PostNotifier};

use crate::shared::forum::{Discussion, Like, Post};

/// Something that happened to a forum entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForumEvent {
    DiscussionCreated(Discussion),
    DiscussionDeleted(Discussion),
    PostCreated(Post),
    PostDeleted(Post),
    LikeCreated(Like),
    LikeUpdated(Like),
}

/// Discriminant used to subscribe handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DiscussionCreated,
    DiscussionDeleted,
    PostCreated,
    PostDeleted,
    LikeCreated,
    LikeUpdated,
}

impl ForumEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ForumEvent::DiscussionCreated(_) => EventKind::DiscussionCreated,
            ForumEvent::DiscussionDeleted(_) => EventKind::DiscussionDeleted,
            ForumEvent::PostCreated(_) => EventKind::PostCreated,
            ForumEvent::PostDeleted(_) => EventKind::PostDeleted,
            ForumEvent::LikeCreated(_) => EventKind::LikeCreated,
            ForumEvent::LikeUpdated(_) => EventKind::LikeUpdated,
        }
    }
}
