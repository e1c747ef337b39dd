//! User persistence

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::{conflict_on_unique, distinct_ids, SqliteStore, StoreError, UserStore};
use crate::shared::forum::{unix_now, Role, User};

pub(crate) const USER_COLUMNS: &str =
    "id, login, email, password_hash, nickname, avatar, summary, role, silenced, created_at, updated_at, last_login";

pub(crate) fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        login: row.try_get("login")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        nickname: row.try_get("nickname")?,
        avatar: row.try_get("avatar")?,
        summary: row.try_get("summary")?,
        role: Role::from_i64(row.try_get("role")?),
        silenced: row.try_get("silenced")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        last_login: row.try_get("last_login")?,
    })
}

impl SqliteStore {
    async fn fetch_user(&self, column: &str, value: &str) -> Result<User, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, column);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)?;
        Ok(user_from_row(&row)?)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn get_user(&self, id: i64) -> Result<User, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn().await?)
            .await?
            .ok_or(StoreError::NotFound)?;
        Ok(user_from_row(&row)?)
    }

    async fn get_user_list_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, StoreError> {
        let ids = distinct_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM users WHERE id IN (", USER_COLUMNS));
        {
            let mut separated = builder.separated(", ");
            for id in &ids {
                separated.push_bind(*id);
            }
        }
        builder.push(")");

        let rows = builder.build().fetch_all(&mut *self.conn().await?).await?;
        rows.iter()
            .map(|row| user_from_row(row).map_err(StoreError::from))
            .collect()
    }

    async fn get_user_by_login(&self, login: &str) -> Result<User, StoreError> {
        self.fetch_user("login", login).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.fetch_user("email", email).await
    }

    #[tracing::instrument(skip(self, user), fields(login = %user.login))]
    async fn create_user(&self, user: &mut User) -> Result<(), StoreError> {
        let now = unix_now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (login, email, password_hash, nickname, avatar, summary, role, silenced, created_at, updated_at, last_login)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.login)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.nickname)
        .bind(&user.avatar)
        .bind(&user.summary)
        .bind(user.role.as_i64())
        .bind(user.silenced)
        .bind(now)
        .bind(now)
        .bind(user.last_login)
        .execute(&mut *self.conn().await?)
        .await
        .map_err(|e| conflict_on_unique(e, "user"))?;

        user.id = result.last_insert_rowid();
        user.created_at = now;
        user.updated_at = now;
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, password_hash = ?, nickname = ?, avatar = ?, summary = ?, role = ?, silenced = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.nickname)
        .bind(&user.avatar)
        .bind(&user.summary)
        .bind(user.role.as_i64())
        .bind(user.silenced)
        .bind(unix_now())
        .bind(user.id)
        .execute(&mut *self.conn().await?)
        .await
        .map_err(|e| conflict_on_unique(e, "user"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn().await?)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: i64, at: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&mut *self.conn().await?)
            .await?;
        Ok(())
    }
}
