//! Notification persistence

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{NotificationStore, SqliteStore, StoreError};
use crate::shared::forum::{unix_now, Notification, NotificationCount, NotificationKind};
use crate::shared::pagination::offset;

const NOTIFICATION_COLUMNS: &str = "id, created_at, kind, from_id, to_id, entity_id, content, status";

fn notification_from_row(row: &SqliteRow) -> Result<Notification, StoreError> {
    let kind: i64 = row.try_get("kind")?;
    Ok(Notification {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        kind: NotificationKind::from_i64(kind)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown notification kind {}", kind)))?,
        from_id: row.try_get("from_id")?,
        to_id: row.try_get("to_id")?,
        entity_id: row.try_get("entity_id")?,
        content: row.try_get("content")?,
        status: row.try_get("status")?,
    })
}

#[async_trait]
impl NotificationStore for SqliteStore {
    async fn get_notification_count(&self, to: i64) -> Result<NotificationCount, StoreError> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT kind, COUNT(*) FROM notifications WHERE to_id = ? AND status = 0 GROUP BY kind",
        )
        .bind(to)
        .fetch_all(&mut *self.conn().await?)
        .await?;

        let mut count = NotificationCount::default();
        for (kind, n) in rows {
            match NotificationKind::from_i64(kind) {
                Some(kind) => count.add(kind, n),
                None => tracing::warn!("Skipping notifications with unknown kind {}", kind),
            }
        }
        Ok(count)
    }

    async fn get_notification(&self, id: i64) -> Result<Notification, StoreError> {
        let sql = format!("SELECT {} FROM notifications WHERE id = ?", NOTIFICATION_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)?;
        notification_from_row(&row)
    }

    async fn get_notification_list(&self, to: i64, kind: NotificationKind, page: i64, size: i64) -> Result<Vec<Notification>, StoreError> {
        let sql = format!(
            "SELECT {} FROM notifications WHERE to_id = ? AND kind = ? ORDER BY id DESC LIMIT ? OFFSET ?",
            NOTIFICATION_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(to)
            .bind(kind.as_i64())
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        rows.iter().map(notification_from_row).collect()
    }

    async fn create_notification(&self, notification: &mut Notification) -> Result<(), StoreError> {
        let now = unix_now();
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (created_at, kind, from_id, to_id, entity_id, content, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(now)
        .bind(notification.kind.as_i64())
        .bind(notification.from_id)
        .bind(notification.to_id)
        .bind(notification.entity_id)
        .bind(&notification.content)
        .bind(notification.status)
        .execute(&mut *self.conn().await?)
        .await?;

        notification.id = result.last_insert_rowid();
        notification.created_at = now;
        Ok(())
    }

    async fn set_notification_read(&self, uid: i64, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE notifications SET status = 1 WHERE id = ? AND to_id = ?")
            .bind(id)
            .bind(uid)
            .execute(&mut *self.conn().await?)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn set_notification_read_kind(&self, to: i64, kind: NotificationKind) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE notifications SET status = 1 WHERE to_id = ? AND kind = ? AND status = 0")
            .bind(to)
            .bind(kind.as_i64())
            .execute(&mut *self.conn().await?)
            .await?;
        Ok(result.rows_affected())
    }
}
