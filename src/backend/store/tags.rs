//! Tag persistence and discussion links

use async_trait::async_trait;
use sqlx::Connection;

use super::discussions::DISCUSSION_COLUMNS;
use super::{conflict_on_unique, SqliteStore, StoreError, TagStore};
use crate::shared::forum::tag::normalize_tags;
use crate::shared::forum::{unix_now, Discussion, Tag};
use crate::shared::pagination::offset;

const TAG_COLUMNS: &str = "id, created_at, text, summary, discussion_count";

#[async_trait]
impl TagStore for SqliteStore {
    async fn get_discussions_by_tag(&self, tag: &str, page: i64, size: i64) -> Result<Vec<Discussion>, StoreError> {
        let columns = DISCUSSION_COLUMNS
            .split(", ")
            .map(|c| format!("d.{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            r#"
            SELECT {}
            FROM discussions d
            JOIN discussion_tags dt ON dt.discussion_id = d.id
            JOIN tags t ON t.id = dt.tag_id
            WHERE t.text = ?
            ORDER BY d.id DESC
            LIMIT ? OFFSET ?
            "#,
            columns
        );
        let discussions = sqlx::query_as::<_, Discussion>(&sql)
            .bind(tag)
            .bind(size)
            .bind(offset(page, size))
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(discussions)
    }

    async fn get_tag_list(&self) -> Result<Vec<Tag>, StoreError> {
        let sql = format!("SELECT {} FROM tags ORDER BY discussion_count DESC, id ASC", TAG_COLUMNS);
        let tags = sqlx::query_as::<_, Tag>(&sql).fetch_all(&mut *self.conn().await?).await?;
        Ok(tags)
    }

    async fn get_tag(&self, id: i64) -> Result<Tag, StoreError> {
        let sql = format!("SELECT {} FROM tags WHERE id = ?", TAG_COLUMNS);
        sqlx::query_as::<_, Tag>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self, tags))]
    async fn link_tag_discussion(&self, discussion_id: i64, tags: &[String]) -> Result<(), StoreError> {
        let tags = normalize_tags(tags);
        if tags.is_empty() {
            return Ok(());
        }

        let now = unix_now();
        let mut conn = self.conn().await?;
        let mut tx = conn.begin().await?;
        for text in &tags {
            sqlx::query("INSERT OR IGNORE INTO tags (created_at, text, summary, discussion_count) VALUES (?, ?, '', 0)")
                .bind(now)
                .bind(text)
                .execute(&mut *tx)
                .await?;

            let tag_id: i64 = sqlx::query_scalar("SELECT id FROM tags WHERE text = ?")
                .bind(text)
                .fetch_one(&mut *tx)
                .await?;

            let linked = sqlx::query("INSERT OR IGNORE INTO discussion_tags (discussion_id, tag_id) VALUES (?, ?)")
                .bind(discussion_id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;

            if linked.rows_affected() > 0 {
                sqlx::query("UPDATE tags SET discussion_count = discussion_count + 1 WHERE id = ?")
                    .bind(tag_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }
        tx.commit().await?;
        Ok(())
    }

    async fn create_tag(&self, text: &str, summary: &str) -> Result<Tag, StoreError> {
        let now = unix_now();
        let text = text.trim();
        let result = sqlx::query("INSERT INTO tags (created_at, text, summary, discussion_count) VALUES (?, ?, ?, 0)")
            .bind(now)
            .bind(text)
            .bind(summary)
            .execute(&mut *self.conn().await?)
            .await
            .map_err(|e| conflict_on_unique(e, "tag"))?;

        Ok(Tag {
            id: result.last_insert_rowid(),
            created_at: now,
            text: text.to_string(),
            summary: summary.to_string(),
            discussion_count: 0,
        })
    }

    async fn update_tag(&self, tag: &Tag) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE tags SET text = ?, summary = ? WHERE id = ?")
            .bind(&tag.text)
            .bind(&tag.summary)
            .bind(tag.id)
            .execute(&mut *self.conn().await?)
            .await
            .map_err(|e| conflict_on_unique(e, "tag"))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_tag(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let mut tx = conn.begin().await?;
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        sqlx::query("DELETE FROM discussion_tags WHERE tag_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
