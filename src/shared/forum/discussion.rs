//! Discussion Data Structure
//!
//! A discussion is a topic opened by a user. `first_post`, `last_post` and
//! `comment_count` are denormalized and maintained by the post event handlers.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Longest accepted title, in characters
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Discussion {
    pub id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub first_post: i64,
    pub last_post: i64,
    pub comment_count: i64,
}

impl Discussion {
    pub fn new(author_id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_id,
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Body of `POST /api/discussions`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateDiscussionRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateDiscussionRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title(&self.title)
    }
}

/// Body of `PUT /api/discussions/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateDiscussionRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub fn validate_title(title: &str) -> Result<(), SharedError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation("title", "title cannot be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(SharedError::validation(
            "title",
            format!("title must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}
