//! Report persistence

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{ReportStore, SqliteStore, StoreError};
use crate::shared::forum::{unix_now, EntityType, Report, ReportStatus};

pub(crate) const REPORT_COLUMNS: &str =
    "id, created_at, updated_at, reporter_id, entity_type, entity_id, reason, status";

pub(crate) fn report_from_row(row: &SqliteRow) -> Result<Report, StoreError> {
    let entity_type: i64 = row.try_get("entity_type")?;
    let status: i64 = row.try_get("status")?;
    Ok(Report {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        reporter_id: row.try_get("reporter_id")?,
        entity_type: EntityType::from_i64(entity_type)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown entity type {}", entity_type)))?,
        entity_id: row.try_get("entity_id")?,
        reason: row.try_get("reason")?,
        status: ReportStatus::from_i64(status)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown report status {}", status)))?,
    })
}

#[async_trait]
impl ReportStore for SqliteStore {
    async fn create_report(&self, report: &mut Report) -> Result<(), StoreError> {
        let now = unix_now();
        let result = sqlx::query(
            r#"
            INSERT INTO reports (created_at, updated_at, reporter_id, entity_type, entity_id, reason, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(report.reporter_id)
        .bind(report.entity_type.as_i64())
        .bind(report.entity_id)
        .bind(&report.reason)
        .bind(report.status.as_i64())
        .execute(&mut *self.conn().await?)
        .await?;

        report.id = result.last_insert_rowid();
        report.created_at = now;
        report.updated_at = now;
        Ok(())
    }

    async fn get_report(&self, id: i64) -> Result<Report, StoreError> {
        let sql = format!("SELECT {} FROM reports WHERE id = ?", REPORT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)?;
        report_from_row(&row)
    }

    async fn update_report(&self, report: &Report) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE reports SET reason = ?, status = ?, updated_at = ? WHERE id = ?")
            .bind(&report.reason)
            .bind(report.status.as_i64())
            .bind(unix_now())
            .bind(report.id)
            .execute(&mut *self.conn().await?)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
