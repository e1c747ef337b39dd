//! Post Data Structure
//!
//! Posts are the replies inside a discussion.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Post {
    pub id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub discussion_id: i64,
    pub author_id: i64,
    /// User being replied to, 0 when the post answers the discussion itself
    pub reply_id: i64,
    pub content: String,
    pub like_count: i64,
}

impl Post {
    pub fn new(discussion_id: i64, author_id: i64, content: impl Into<String>) -> Self {
        Self {
            discussion_id,
            author_id,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_reply(mut self, reply_id: i64) -> Self {
        self.reply_id = reply_id;
        self
    }
}

/// Body of `POST /api/posts`
///
/// `author_id` is only honoured for admins; everyone else posts as themselves.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreatePostRequest {
    pub discussion_id: i64,
    #[serde(default)]
    pub author_id: i64,
    #[serde(default)]
    pub reply_id: i64,
    pub content: String,
}

/// Body of `PUT /api/posts/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub content: String,
}
