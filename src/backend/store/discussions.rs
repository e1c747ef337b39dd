//! Discussion persistence

use async_trait::async_trait;
use sqlx::{Connection, QueryBuilder, Sqlite};

use super::{distinct_ids, DiscussionStore, SqliteStore, StoreError};
use crate::shared::forum::{unix_now, Discussion};
use crate::shared::pagination::offset;

pub(crate) const DISCUSSION_COLUMNS: &str =
    "id, created_at, updated_at, title, content, author_id, first_post, last_post, comment_count";

/// `ORDER BY`/`WHERE` fragments for a list filter
fn filter_clause(filter: &str) -> (&'static str, &'static str) {
    match filter {
        "hot" => ("", "ORDER BY comment_count DESC, id DESC"),
        "unanswered" => ("WHERE comment_count = 0", "ORDER BY id DESC"),
        _ => ("", "ORDER BY id DESC"),
    }
}

#[async_trait]
impl DiscussionStore for SqliteStore {
    async fn get_discussion_list(&self, page: i64, size: i64, filter: &str) -> Result<Vec<Discussion>, StoreError> {
        let (condition, order) = filter_clause(filter);
        let sql = format!(
            "SELECT {} FROM discussions {} {} LIMIT ? OFFSET ?",
            DISCUSSION_COLUMNS, condition, order
        );
        let discussions = sqlx::query_as::<_, Discussion>(&sql)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(discussions)
    }

    async fn get_discussion_list_user(&self, uid: i64, page: i64, size: i64) -> Result<Vec<Discussion>, StoreError> {
        let sql = format!(
            "SELECT {} FROM discussions WHERE author_id = ? ORDER BY id DESC LIMIT ? OFFSET ?",
            DISCUSSION_COLUMNS
        );
        let discussions = sqlx::query_as::<_, Discussion>(&sql)
            .bind(uid)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(discussions)
    }

    async fn get_discussion_list_by_ids(&self, ids: &[i64]) -> Result<Vec<Discussion>, StoreError> {
        let ids = distinct_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM discussions WHERE id IN (",
            DISCUSSION_COLUMNS
        ));
        {
            let mut separated = builder.separated(", ");
            for id in &ids {
                separated.push_bind(*id);
            }
        }
        builder.push(") ORDER BY id DESC");

        let discussions = builder
            .build_query_as::<Discussion>()
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(discussions)
    }

    async fn get_discussion(&self, id: i64) -> Result<Discussion, StoreError> {
        let sql = format!("SELECT {} FROM discussions WHERE id = ?", DISCUSSION_COLUMNS);
        sqlx::query_as::<_, Discussion>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self, discussion), fields(author_id = discussion.author_id))]
    async fn create_discussion(&self, discussion: &mut Discussion) -> Result<(), StoreError> {
        let now = unix_now();
        let result = sqlx::query(
            r#"
            INSERT INTO discussions (created_at, updated_at, title, content, author_id, first_post, last_post, comment_count)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(&discussion.title)
        .bind(&discussion.content)
        .bind(discussion.author_id)
        .bind(discussion.first_post)
        .bind(discussion.last_post)
        .bind(discussion.comment_count)
        .execute(&mut *self.conn().await?)
        .await?;

        discussion.id = result.last_insert_rowid();
        discussion.created_at = now;
        discussion.updated_at = now;
        Ok(())
    }

    async fn update_discussion(&self, discussion: &Discussion) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE discussions
            SET title = ?, content = ?, first_post = ?, last_post = ?, comment_count = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&discussion.title)
        .bind(&discussion.content)
        .bind(discussion.first_post)
        .bind(discussion.last_post)
        .bind(discussion.comment_count)
        .bind(unix_now())
        .bind(discussion.id)
        .execute(&mut *self.conn().await?)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_discussion(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let mut tx = conn.begin().await?;

        let result = sqlx::query("DELETE FROM discussions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        sqlx::query("DELETE FROM likes WHERE post_id IN (SELECT id FROM posts WHERE discussion_id = ?)")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM posts WHERE discussion_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"
            UPDATE tags
            SET discussion_count = MAX(discussion_count - 1, 0)
            WHERE id IN (SELECT tag_id FROM discussion_tags WHERE discussion_id = ?)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM discussion_tags WHERE discussion_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn adjust_discussion_comments(&self, id: i64, delta: i64, last_post: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE discussions
            SET comment_count = MAX(comment_count + ?, 0),
                last_post = CASE WHEN ? > 0 THEN ? ELSE last_post END,
                first_post = CASE WHEN first_post = 0 AND ? > 0 THEN ? ELSE first_post END
            WHERE id = ?
            "#,
        )
        .bind(delta)
        .bind(last_post)
        .bind(last_post)
        .bind(last_post)
        .bind(last_post)
        .bind(id)
        .execute(&mut *self.conn().await?)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
