//! Like Data Structure
//!
//! One row per (post, user). Unliking keeps the row and flips `status` to 0.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeStatus {
    Withdrawn,
    Active,
}

impl LikeStatus {
    pub fn as_i64(&self) -> i64 {
        match self {
            LikeStatus::Withdrawn => 0,
            LikeStatus::Active => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Like {
    pub id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub post_id: i64,
    pub user_id: i64,
    /// 1 = liked, 0 = withdrawn
    pub status: i64,
}

impl Like {
    pub fn new(post_id: i64, user_id: i64) -> Self {
        Self {
            post_id,
            user_id,
            status: LikeStatus::Active.as_i64(),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != LikeStatus::Withdrawn.as_i64()
    }

    pub fn set_status(&mut self, status: LikeStatus) {
        self.status = status.as_i64();
    }
}
