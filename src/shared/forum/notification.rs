//! Notification Data Structure
//!
//! Notifications are produced by the event handlers (comments, replies,
//! likes) or by admins (system notices).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone posted in a discussion you started
    Comment,
    /// Someone replied to you
    Reply,
    /// Someone liked your post
    Like,
    /// Site notice
    System,
}

impl NotificationKind {
    pub fn as_i64(&self) -> i64 {
        match self {
            NotificationKind::Comment => 0,
            NotificationKind::Reply => 1,
            NotificationKind::Like => 2,
            NotificationKind::System => 3,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(NotificationKind::Comment),
            1 => Some(NotificationKind::Reply),
            2 => Some(NotificationKind::Like),
            3 => Some(NotificationKind::System),
            _ => None,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "comment" => Some(NotificationKind::Comment),
            "reply" => Some(NotificationKind::Reply),
            "like" => Some(NotificationKind::Like),
            "system" => Some(NotificationKind::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    pub created_at: i64,
    pub kind: NotificationKind,
    pub from_id: i64,
    pub to_id: i64,
    /// Post or discussion the notice is about
    pub entity_id: i64,
    pub content: String,
    /// 0 = unread, 1 = read
    pub status: i64,
}

impl Notification {
    pub fn new(kind: NotificationKind, from_id: i64, to_id: i64, entity_id: i64) -> Self {
        Self {
            id: 0,
            created_at: 0,
            kind,
            from_id,
            to_id,
            entity_id,
            content: String::new(),
            status: 0,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn is_read(&self) -> bool {
        self.status != 0
    }
}

/// Unread counts per kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NotificationCount {
    pub comment: i64,
    pub reply: i64,
    pub like: i64,
    pub system: i64,
    pub total: i64,
}

impl NotificationCount {
    pub fn add(&mut self, kind: NotificationKind, count: i64) {
        match kind {
            NotificationKind::Comment => self.comment += count,
            NotificationKind::Reply => self.reply += count,
            NotificationKind::Like => self.like += count,
            NotificationKind::System => self.system += count,
        }
        self.total += count;
    }
}
