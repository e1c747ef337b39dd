//! Tag Data Structure

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub created_at: i64,
    pub text: String,
    pub summary: String,
    pub discussion_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateTagRequest {
    pub text: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTagRequest {
    pub text: Option<String>,
    pub summary: Option<String>,
}

/// Normalize a list of tag names: trim, drop blanks and duplicates, keep order
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}
