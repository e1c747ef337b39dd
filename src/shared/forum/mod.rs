//! Forum Data Model
//!
//! Records shared by the store, the event handlers and the HTTP layer:
//!
//! - `User` / `PublicUser` - accounts and their public projection
//! - `Discussion` - a topic with denormalized post counters
//! - `Post` - a reply inside a discussion
//! - `Like` - a user's like of a post (withdrawable)
//! - `Tag` - a label linked to discussions
//! - `Notification` - comment/reply/like/system notices
//! - `Report` - a moderation report against a discussion or post
//! - `ChatMessage` - a direct message between two users
//! - `DailyCount`, `SearchParams` - admin statistics and search
//!
//! All timestamps are Unix seconds.
//!
//! # Usage
//!
//! ```rust
//! use kawa_forum::shared::forum::{Post, Discussion, Like};
//! ```

pub mod user;
pub mod discussion;
pub mod post;
pub mod like;
pub mod tag;
pub mod notification;
pub mod report;
pub mod stats;
pub mod chat;

pub use user::{User, PublicUser, Role, UpdateUserRequest};
pub use discussion::{Discussion, CreateDiscussionRequest, UpdateDiscussionRequest};
pub use post::{Post, CreatePostRequest, UpdatePostRequest};
pub use like::{Like, LikeStatus};
pub use tag::{Tag, CreateTagRequest, UpdateTagRequest};
pub use notification::{Notification, NotificationKind, NotificationCount};
pub use report::{Report, EntityType, ReportStatus, CreateReportRequest, UpdateReportRequest};
pub use stats::{DailyCount, SearchParams, SiteStats};
pub use chat::{ChatMessage, CreateChatRequest};

/// Current time as Unix seconds
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
