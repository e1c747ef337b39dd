//! Dashboard counters and admin search

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::discussions::DISCUSSION_COLUMNS;
use super::posts::POST_COLUMNS;
use super::reports::{report_from_row, REPORT_COLUMNS};
use super::users::{user_from_row, USER_COLUMNS};
use super::{AdminStore, SqliteStore, StoreError};
use crate::shared::forum::stats::LIKE_ESCAPE;
use crate::shared::forum::{DailyCount, Discussion, Post, Report, SearchParams, User};
use crate::shared::pagination::offset;

/// Searchable tables and the columns each filter applies to
#[derive(Debug, Clone, Copy)]
enum SearchTarget {
    Users,
    Discussions,
    Posts,
    Reports,
}

impl SearchTarget {
    fn table(self) -> &'static str {
        match self {
            SearchTarget::Users => "users",
            SearchTarget::Discussions => "discussions",
            SearchTarget::Posts => "posts",
            SearchTarget::Reports => "reports",
        }
    }

    fn text_columns(self) -> &'static [&'static str] {
        match self {
            SearchTarget::Users => &["login", "nickname", "email"],
            SearchTarget::Discussions => &["title", "content"],
            SearchTarget::Posts => &["content"],
            SearchTarget::Reports => &["reason"],
        }
    }

    fn author_column(self) -> Option<&'static str> {
        match self {
            SearchTarget::Users => None,
            SearchTarget::Discussions | SearchTarget::Posts => Some("author_id"),
            SearchTarget::Reports => Some("reporter_id"),
        }
    }

    fn status_column(self) -> Option<&'static str> {
        match self {
            SearchTarget::Users => Some("silenced"),
            SearchTarget::Reports => Some("status"),
            SearchTarget::Discussions | SearchTarget::Posts => None,
        }
    }

    /// Append the WHERE clause for `params`
    fn push_filters(self, builder: &mut QueryBuilder<'_, Sqlite>, params: &SearchParams) {
        builder.push(" WHERE 1 = 1");

        if let Some(pattern) = params.like_pattern() {
            builder.push(" AND (");
            let mut columns = builder.separated(" OR ");
            for column in self.text_columns() {
                columns.push(format!("{} LIKE ", column));
                columns.push_bind_unseparated(pattern.clone());
                columns.push_unseparated(format!(" ESCAPE '{}'", LIKE_ESCAPE));
            }
            builder.push(")");
        }
        if let (Some(column), Some(author_id)) = (self.author_column(), params.author_id) {
            builder.push(format!(" AND {} = ", column)).push_bind(author_id);
        }
        if let (Some(column), Some(status)) = (self.status_column(), params.status) {
            builder.push(format!(" AND {} = ", column)).push_bind(status);
        }
    }

    fn select(self, columns: &str, params: &SearchParams, page: i64, size: i64) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", columns, self.table()));
        self.push_filters(&mut builder, params);
        builder
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(size)
            .push(" OFFSET ")
            .push_bind(offset(page, size));
        builder
    }

    fn count(self, params: &SearchParams) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", self.table()));
        self.push_filters(&mut builder, params);
        builder
    }
}

impl SqliteStore {
    /// Rows of `table`, only those with `column >= since` when given
    async fn count_rows(&self, table: &str, column: &str, since: Option<i64>) -> Result<i64, StoreError> {
        let count = match since {
            Some(since) => {
                let sql = format!("SELECT COUNT(*) FROM {} WHERE {} >= ?", table, column);
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(since)
                    .fetch_one(&mut *self.conn().await?)
                    .await?
            }
            None => {
                let sql = format!("SELECT COUNT(*) FROM {}", table);
                sqlx::query_scalar::<_, i64>(&sql).fetch_one(&mut *self.conn().await?).await?
            }
        };
        Ok(count)
    }

    /// Rows per UTC day of `column` in `[from, to)`, days without rows omitted
    async fn daily_counts(&self, table: &str, column: &str, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError> {
        let sql = format!(
            r#"
            SELECT date({column}, 'unixepoch') AS day, COUNT(*) AS count
            FROM {table}
            WHERE {column} >= ? AND {column} < ?
            GROUP BY day
            ORDER BY day
            "#,
        );
        let days = sqlx::query_as::<_, DailyCount>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(days)
    }

    async fn search_count(&self, target: SearchTarget, params: &SearchParams) -> Result<i64, StoreError> {
        let count = target
            .count(params)
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.conn().await?)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl AdminStore for SqliteStore {
    async fn get_total_users(&self) -> Result<i64, StoreError> {
        self.count_rows("users", "created_at", None).await
    }

    async fn get_new_users(&self, since: i64) -> Result<i64, StoreError> {
        self.count_rows("users", "created_at", Some(since)).await
    }

    async fn get_total_discussions(&self) -> Result<i64, StoreError> {
        self.count_rows("discussions", "created_at", None).await
    }

    async fn get_new_discussions(&self, since: i64) -> Result<i64, StoreError> {
        self.count_rows("discussions", "created_at", Some(since)).await
    }

    async fn get_new_user_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError> {
        self.daily_counts("users", "created_at", from, to).await
    }

    async fn get_new_discussion_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError> {
        self.daily_counts("discussions", "created_at", from, to).await
    }

    async fn get_new_post_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError> {
        self.daily_counts("posts", "created_at", from, to).await
    }

    async fn get_user_active(&self, since: i64) -> Result<i64, StoreError> {
        self.count_rows("users", "last_login", Some(since)).await
    }

    async fn get_user_active_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError> {
        self.daily_counts("users", "last_login", from, to).await
    }

    async fn search_users(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<User>, StoreError> {
        let rows = SearchTarget::Users
            .select(USER_COLUMNS, params, page, size)
            .build()
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(rows.iter().map(user_from_row).collect::<Result<Vec<User>, sqlx::Error>>()?)
    }

    async fn search_users_count(&self, params: &SearchParams) -> Result<i64, StoreError> {
        self.search_count(SearchTarget::Users, params).await
    }

    async fn search_discussions(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<Discussion>, StoreError> {
        let discussions = SearchTarget::Discussions
            .select(DISCUSSION_COLUMNS, params, page, size)
            .build_query_as::<Discussion>()
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(discussions)
    }

    async fn search_discussions_count(&self, params: &SearchParams) -> Result<i64, StoreError> {
        self.search_count(SearchTarget::Discussions, params).await
    }

    async fn search_posts(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<Post>, StoreError> {
        let posts = SearchTarget::Posts
            .select(POST_COLUMNS, params, page, size)
            .build_query_as::<Post>()
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(posts)
    }

    async fn search_posts_count(&self, params: &SearchParams) -> Result<i64, StoreError> {
        self.search_count(SearchTarget::Posts, params).await
    }

    async fn search_reports(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<Report>, StoreError> {
        let rows = SearchTarget::Reports
            .select(REPORT_COLUMNS, params, page, size)
            .build()
            .fetch_all(&mut *self.conn().await?)
            .await?;
        rows.iter().map(report_from_row).collect()
    }

    async fn search_reports_count(&self, params: &SearchParams) -> Result<i64, StoreError> {
        self.search_count(SearchTarget::Reports, params).await
    }
}
