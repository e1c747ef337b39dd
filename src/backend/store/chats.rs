//! Direct message persistence

use async_trait::async_trait;

use super::{ChatStore, SqliteStore, StoreError};
use crate::shared::forum::{unix_now, ChatMessage};
use crate::shared::pagination::offset;

const CHAT_COLUMNS: &str = "id, created_at, from_id, to_id, content, status";

#[async_trait]
impl ChatStore for SqliteStore {
    async fn get_chat_msg_list(&self, a: i64, b: i64, page: i64, size: i64) -> Result<Vec<ChatMessage>, StoreError> {
        let sql = format!(
            r#"
            SELECT {} FROM chats
            WHERE (from_id = ? AND to_id = ?) OR (from_id = ? AND to_id = ?)
            ORDER BY id DESC LIMIT ? OFFSET ?
            "#,
            CHAT_COLUMNS
        );
        let messages = sqlx::query_as::<_, ChatMessage>(&sql)
            .bind(a)
            .bind(b)
            .bind(b)
            .bind(a)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(messages)
    }

    async fn get_chat_message(&self, id: i64) -> Result<ChatMessage, StoreError> {
        let sql = format!("SELECT {} FROM chats WHERE id = ?", CHAT_COLUMNS);
        sqlx::query_as::<_, ChatMessage>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self, message), fields(from_id = message.from_id, to_id = message.to_id))]
    async fn create_chat_message(&self, message: &mut ChatMessage) -> Result<(), StoreError> {
        let now = unix_now();
        let result = sqlx::query(
            "INSERT INTO chats (created_at, from_id, to_id, content, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(now)
        .bind(message.from_id)
        .bind(message.to_id)
        .bind(&message.content)
        .bind(message.status)
        .execute(&mut *self.conn().await?)
        .await?;

        message.id = result.last_insert_rowid();
        message.created_at = now;
        Ok(())
    }

    async fn set_chat_msg_read(&self, from: i64, to: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE chats SET status = 1 WHERE from_id = ? AND to_id = ? AND status = 0")
            .bind(from)
            .bind(to)
            .execute(&mut *self.conn().await?)
            .await?;
        Ok(result.rows_affected())
    }

    async fn get_chat_user_list(&self, uid: i64, page: i64, size: i64) -> Result<Vec<ChatMessage>, StoreError> {
        let sql = format!(
            r#"
            SELECT {} FROM chats
            WHERE id IN (
                SELECT MAX(id) FROM chats
                WHERE from_id = ? OR to_id = ?
                GROUP BY CASE WHEN from_id = ? THEN to_id ELSE from_id END
            )
            ORDER BY id DESC LIMIT ? OFFSET ?
            "#,
            CHAT_COLUMNS
        );
        let messages = sqlx::query_as::<_, ChatMessage>(&sql)
            .bind(uid)
            .bind(uid)
            .bind(uid)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(messages)
    }
}
