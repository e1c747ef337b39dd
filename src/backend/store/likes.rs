//! Like persistence

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::{conflict_on_unique, distinct_ids, LikeStore, SqliteStore, StoreError};
use crate::shared::forum::{unix_now, Like};
use crate::shared::pagination::offset;

const LIKE_COLUMNS: &str = "id, created_at, updated_at, post_id, user_id, status";

#[async_trait]
impl LikeStore for SqliteStore {
    async fn get_like_list(&self, post_id: i64, page: i64, size: i64) -> Result<Vec<Like>, StoreError> {
        let sql = format!(
            "SELECT {} FROM likes WHERE post_id = ? AND status = 1 ORDER BY id DESC LIMIT ? OFFSET ?",
            LIKE_COLUMNS
        );
        let likes = sqlx::query_as::<_, Like>(&sql)
            .bind(post_id)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(likes)
    }

    async fn get_like_list_user(&self, uid: i64, page: i64, size: i64) -> Result<Vec<Like>, StoreError> {
        let sql = format!(
            "SELECT {} FROM likes WHERE user_id = ? AND status = 1 ORDER BY id DESC LIMIT ? OFFSET ?",
            LIKE_COLUMNS
        );
        let likes = sqlx::query_as::<_, Like>(&sql)
            .bind(uid)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(likes)
    }

    async fn get_like_count(&self, post_id: i64) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ? AND status = 1")
            .bind(post_id)
            .fetch_one(&mut *self.conn().await?)
            .await?;
        Ok(count)
    }

    async fn get_like(&self, post_id: i64, uid: i64) -> Result<Like, StoreError> {
        let sql = format!("SELECT {} FROM likes WHERE post_id = ? AND user_id = ?", LIKE_COLUMNS);
        sqlx::query_as::<_, Like>(&sql)
            .bind(post_id)
            .bind(uid)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn get_like_id(&self, id: i64) -> Result<Like, StoreError> {
        let sql = format!("SELECT {} FROM likes WHERE id = ?", LIKE_COLUMNS);
        sqlx::query_as::<_, Like>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn create_like(&self, like: &mut Like) -> Result<(), StoreError> {
        let now = unix_now();
        let result = sqlx::query(
            "INSERT INTO likes (created_at, updated_at, post_id, user_id, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(now)
        .bind(now)
        .bind(like.post_id)
        .bind(like.user_id)
        .bind(like.status)
        .execute(&mut *self.conn().await?)
        .await
        .map_err(|e| conflict_on_unique(e, "like"))?;

        like.id = result.last_insert_rowid();
        like.created_at = now;
        like.updated_at = now;
        Ok(())
    }

    async fn update_like(&self, like: &Like) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE likes SET status = ?, updated_at = ? WHERE id = ?")
            .bind(like.status)
            .bind(unix_now())
            .bind(like.id)
            .execute(&mut *self.conn().await?)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_like(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM likes WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn().await?)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_like_post_list(&self, uid: i64, post_ids: &[i64]) -> Result<Vec<i64>, StoreError> {
        let post_ids = distinct_ids(post_ids);
        if uid <= 0 || post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT post_id FROM likes WHERE status = 1 AND user_id = ");
        builder.push_bind(uid);
        builder.push(" AND post_id IN (");
        {
            let mut separated = builder.separated(", ");
            for id in &post_ids {
                separated.push_bind(*id);
            }
        }
        builder.push(")");

        let ids = builder.build_query_scalar::<i64>().fetch_all(&mut *self.conn().await?).await?;
        Ok(ids)
    }
}
