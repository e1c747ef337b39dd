//! Site settings persistence

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::{MetaStore, SqliteStore, StoreError};
use crate::shared::forum::unix_now;

#[async_trait]
impl MetaStore for SqliteStore {
    async fn get_meta_data(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM meta")
            .fetch_all(&mut *self.conn().await?)
            .await?;
        Ok(rows.into_iter().collect())
    }

    async fn get_meta_value(&self, key: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM meta WHERE key = ?")
            .bind(key)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self, data), fields(keys = data.len()))]
    async fn put_meta_data(&self, data: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let now = unix_now();
        let mut conn = self.conn().await?;
        for (key, value) in data {
            sqlx::query(
                r#"
                INSERT INTO meta (key, value, updated_at) VALUES (?, ?, ?)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(now)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
