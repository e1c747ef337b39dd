//! Admin Statistics and Search Types

use serde::{Deserialize, Serialize};

/// Number of records created on one calendar day (UTC)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub day: String,
    pub count: i64,
}

/// Escape character paired with [`SearchParams::like_pattern`]
pub const LIKE_ESCAPE: char = '\\';

/// Filters for the admin search endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Substring match on the entity's main text column
    pub q: Option<String>,
    pub author_id: Option<i64>,
    pub status: Option<i64>,
}

impl SearchParams {
    /// The keyword as a `LIKE ... ESCAPE '\'` pattern, `None` when blank
    ///
    /// `%`, `_` and `\\` in the keyword match themselves.
    pub fn like_pattern(&self) -> Option<String> {
        let q = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())?;
        let mut pattern = String::with_capacity(q.len() + 2);
        pattern.push('%');
        for c in q.chars() {
            if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}

/// Site counters shown on the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SiteStats {
    pub total_users: i64,
    pub new_users_today: i64,
    pub total_discussions: i64,
    pub new_discussions_today: i64,
    /// Users whose last login falls on the current day
    pub active_users_today: i64,
}
