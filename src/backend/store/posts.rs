//! Post persistence

use async_trait::async_trait;
use sqlx::{Connection, QueryBuilder, Sqlite};

use super::{distinct_ids, PostStore, SqliteStore, StoreError};
use crate::shared::forum::{unix_now, Post};
use crate::shared::pagination::offset;

pub(crate) const POST_COLUMNS: &str =
    "id, created_at, updated_at, discussion_id, author_id, reply_id, content, like_count";

#[async_trait]
impl PostStore for SqliteStore {
    async fn get_post_list(&self, discussion_id: i64, page: i64, size: i64) -> Result<Vec<Post>, StoreError> {
        let sql = format!(
            "SELECT {} FROM posts WHERE discussion_id = ? ORDER BY id ASC LIMIT ? OFFSET ?",
            POST_COLUMNS
        );
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(discussion_id)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(posts)
    }

    async fn get_post_list_user(&self, uid: i64, page: i64, size: i64) -> Result<Vec<Post>, StoreError> {
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ? ORDER BY id DESC LIMIT ? OFFSET ?",
            POST_COLUMNS
        );
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(uid)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(posts)
    }

    async fn get_post_list_by_ids(&self, ids: &[i64]) -> Result<Vec<Post>, StoreError> {
        let ids = distinct_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM posts WHERE id IN (", POST_COLUMNS));
        {
            let mut separated = builder.separated(", ");
            for id in &ids {
                separated.push_bind(*id);
            }
        }
        builder.push(") ORDER BY id ASC");

        let posts = builder.build_query_as::<Post>().fetch_all(&mut *self.conn().await?).await?;
        Ok(posts)
    }

    async fn get_post_count(&self, discussion_id: i64) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE discussion_id = ?")
            .bind(discussion_id)
            .fetch_one(&mut *self.conn().await?)
            .await?;
        Ok(count)
    }

    async fn get_post(&self, id: i64) -> Result<Post, StoreError> {
        let sql = format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self, post), fields(discussion_id = post.discussion_id, author_id = post.author_id))]
    async fn create_post(&self, post: &mut Post) -> Result<(), StoreError> {
        let now = unix_now();
        let result = sqlx::query(
            r#"
            INSERT INTO posts (created_at, updated_at, discussion_id, author_id, reply_id, content, like_count)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(post.discussion_id)
        .bind(post.author_id)
        .bind(post.reply_id)
        .bind(&post.content)
        .bind(post.like_count)
        .execute(&mut *self.conn().await?)
        .await?;

        post.id = result.last_insert_rowid();
        post.created_at = now;
        post.updated_at = now;
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET content = ?, reply_id = ?, like_count = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&post.content)
        .bind(post.reply_id)
        .bind(post.like_count)
        .bind(unix_now())
        .bind(post.id)
        .execute(&mut *self.conn().await?)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let mut tx = conn.begin().await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        sqlx::query("DELETE FROM likes WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn adjust_post_likes(&self, id: i64, delta: i64) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE posts SET like_count = MAX(like_count + ?, 0) WHERE id = ?")
            .bind(delta)
            .bind(id)
            .execute(&mut *self.conn().await?)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
