//! Chat Message Data Structure
//!
//! Direct messages between two users.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct ChatMessage {
    pub id: i64,
    pub created_at: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub content: String,
    /// 0 = unread, 1 = read
    pub status: i64,
}

impl ChatMessage {
    pub fn new(from_id: i64, to_id: i64, content: impl Into<String>) -> Self {
        Self {
            from_id,
            to_id,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn is_read(&self) -> bool {
        self.status != 0
    }

    /// The other side of the conversation as seen by `uid`
    pub fn peer_of(&self, uid: i64) -> i64 {
        if self.from_id == uid {
            self.to_id
        } else {
            self.from_id
        }
    }
}

/// Body of `POST /api/chats`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateChatRequest {
    pub to_id: i64,
    pub content: String,
}
