//! Storage Module
//!
//! Per-entity storage traits and their SQLite implementation.
//!
//! # Architecture
//!
//! Each entity gets a `*Store` trait with its CRUD operations. `Store`
//! combines all of them and is what handlers and event subscribers hold, as
//! an `Arc<dyn Store>` in the application state.
//!
//! ```text
//! store/
//! ├── mod.rs            - Traits, StoreError, SqliteStore
//! ├── users.rs          - UserStore
//! ├── discussions.rs    - DiscussionStore
//! ├── posts.rs          - PostStore
//! ├── likes.rs          - LikeStore
//! ├── tags.rs           - TagStore
//! ├── notifications.rs  - NotificationStore
//! ├── reports.rs        - ReportStore
//! ├── admin.rs          - AdminStore (counters, daily stats, search)
//! ├── meta.rs           - MetaStore (site key/value settings)
//! └── chats.rs          - ChatStore (direct messages)
//! ```
//!
//! # Conventions
//!
//! - Lookups by key return `StoreError::NotFound` when the row is absent.
//! - `create_*` takes `&mut` and fills in the generated id and timestamps.
//! - Unique constraint violations surface as `StoreError::Conflict`.
//! - Lists are paged with a 1-based `page` and a `size`.
//! - `TransactionStore::begin` hands out a `Store` whose every call runs in
//!   one transaction; it rolls back unless `commit` is called.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::shared::forum::{
    ChatMessage, DailyCount, Discussion, Like, Notification, NotificationCount,
    NotificationKind, Post, Report, SearchParams, Tag, User,
};

pub mod users;
pub mod discussions;
pub mod posts;
pub mod likes;
pub mod tags;
pub mod notifications;
pub mod reports;
pub mod admin;
pub mod meta;
pub mod chats;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row does not exist
    #[error("record not found")]
    NotFound,

    /// A unique constraint was violated
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value could not be mapped onto the model
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// The handle's transaction was already committed, or a second one was opened on it
    #[error("transaction {0}")]
    Transaction(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Map a unique violation onto `Conflict`, pass anything else through
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: &str) -> StoreError {
    let unique = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if unique {
        StoreError::Conflict(format!("{} already exists", what))
    } else {
        StoreError::Sqlx(err)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<User, StoreError>;
    /// Users for the given ids; unknown ids, zeros and duplicates are skipped
    async fn get_user_list_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, StoreError>;
    async fn get_user_by_login(&self, login: &str) -> Result<User, StoreError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;
    async fn create_user(&self, user: &mut User) -> Result<(), StoreError>;
    async fn update_user(&self, user: &User) -> Result<(), StoreError>;
    async fn delete_user(&self, id: i64) -> Result<(), StoreError>;
    async fn touch_last_login(&self, id: i64, at: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait DiscussionStore: Send + Sync {
    /// `filter`: `""`/`"latest"`, `"hot"` or `"unanswered"`
    async fn get_discussion_list(&self, page: i64, size: i64, filter: &str) -> Result<Vec<Discussion>, StoreError>;
    async fn get_discussion_list_user(&self, uid: i64, page: i64, size: i64) -> Result<Vec<Discussion>, StoreError>;
    async fn get_discussion_list_by_ids(&self, ids: &[i64]) -> Result<Vec<Discussion>, StoreError>;
    async fn get_discussion(&self, id: i64) -> Result<Discussion, StoreError>;
    async fn create_discussion(&self, discussion: &mut Discussion) -> Result<(), StoreError>;
    async fn update_discussion(&self, discussion: &Discussion) -> Result<(), StoreError>;
    /// Deletes the discussion with its posts and tag links
    async fn delete_discussion(&self, id: i64) -> Result<(), StoreError>;
    /// Add `delta` to `comment_count` (floored at 0); a non-zero `last_post`
    /// becomes the new last post and fills `first_post` when unset
    async fn adjust_discussion_comments(&self, id: i64, delta: i64, last_post: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get_post_list(&self, discussion_id: i64, page: i64, size: i64) -> Result<Vec<Post>, StoreError>;
    async fn get_post_list_user(&self, uid: i64, page: i64, size: i64) -> Result<Vec<Post>, StoreError>;
    async fn get_post_list_by_ids(&self, ids: &[i64]) -> Result<Vec<Post>, StoreError>;
    async fn get_post_count(&self, discussion_id: i64) -> Result<i64, StoreError>;
    async fn get_post(&self, id: i64) -> Result<Post, StoreError>;
    async fn create_post(&self, post: &mut Post) -> Result<(), StoreError>;
    async fn update_post(&self, post: &Post) -> Result<(), StoreError>;
    async fn delete_post(&self, id: i64) -> Result<(), StoreError>;
    /// Add `delta` to `like_count`, never going below 0
    async fn adjust_post_likes(&self, id: i64, delta: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn get_like_list(&self, post_id: i64, page: i64, size: i64) -> Result<Vec<Like>, StoreError>;
    async fn get_like_list_user(&self, uid: i64, page: i64, size: i64) -> Result<Vec<Like>, StoreError>;
    async fn get_like_count(&self, post_id: i64) -> Result<i64, StoreError>;
    async fn get_like(&self, post_id: i64, uid: i64) -> Result<Like, StoreError>;
    async fn get_like_id(&self, id: i64) -> Result<Like, StoreError>;
    async fn create_like(&self, like: &mut Like) -> Result<(), StoreError>;
    async fn update_like(&self, like: &Like) -> Result<(), StoreError>;
    async fn delete_like(&self, id: i64) -> Result<(), StoreError>;
    /// The subset of `post_ids` that `uid` currently likes
    async fn get_like_post_list(&self, uid: i64, post_ids: &[i64]) -> Result<Vec<i64>, StoreError>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    async fn get_discussions_by_tag(&self, tag: &str, page: i64, size: i64) -> Result<Vec<Discussion>, StoreError>;
    async fn get_tag_list(&self) -> Result<Vec<Tag>, StoreError>;
    async fn get_tag(&self, id: i64) -> Result<Tag, StoreError>;
    /// Link tags by name, creating unknown ones
    async fn link_tag_discussion(&self, discussion_id: i64, tags: &[String]) -> Result<(), StoreError>;
    async fn create_tag(&self, text: &str, summary: &str) -> Result<Tag, StoreError>;
    async fn update_tag(&self, tag: &Tag) -> Result<(), StoreError>;
    async fn delete_tag(&self, id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Unread counts of `to`
    async fn get_notification_count(&self, to: i64) -> Result<NotificationCount, StoreError>;
    async fn get_notification(&self, id: i64) -> Result<Notification, StoreError>;
    async fn get_notification_list(&self, to: i64, kind: NotificationKind, page: i64, size: i64) -> Result<Vec<Notification>, StoreError>;
    async fn create_notification(&self, notification: &mut Notification) -> Result<(), StoreError>;
    /// Mark one of `uid`'s notifications as read; `NotFound` if it is not theirs
    async fn set_notification_read(&self, uid: i64, id: i64) -> Result<(), StoreError>;
    /// Mark every notification of one kind as read, returning how many changed
    async fn set_notification_read_kind(&self, to: i64, kind: NotificationKind) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn create_report(&self, report: &mut Report) -> Result<(), StoreError>;
    async fn get_report(&self, id: i64) -> Result<Report, StoreError>;
    async fn update_report(&self, report: &Report) -> Result<(), StoreError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn get_total_users(&self) -> Result<i64, StoreError>;
    async fn get_new_users(&self, since: i64) -> Result<i64, StoreError>;
    async fn get_total_discussions(&self) -> Result<i64, StoreError>;
    async fn get_new_discussions(&self, since: i64) -> Result<i64, StoreError>;

    /// Daily creation counts in `[from, to)` (Unix seconds); days without rows are omitted
    async fn get_new_user_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError>;
    async fn get_new_discussion_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError>;
    async fn get_new_post_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError>;

    /// Users whose last login is at or after `since`
    async fn get_user_active(&self, since: i64) -> Result<i64, StoreError>;
    /// Users bucketed by the day of their last login in `[from, to)`
    async fn get_user_active_daily(&self, from: i64, to: i64) -> Result<Vec<DailyCount>, StoreError>;

    async fn search_users(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<User>, StoreError>;
    async fn search_users_count(&self, params: &SearchParams) -> Result<i64, StoreError>;
    async fn search_discussions(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<Discussion>, StoreError>;
    async fn search_discussions_count(&self, params: &SearchParams) -> Result<i64, StoreError>;
    async fn search_posts(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<Post>, StoreError>;
    async fn search_posts_count(&self, params: &SearchParams) -> Result<i64, StoreError>;
    async fn search_reports(&self, params: &SearchParams, page: i64, size: i64) -> Result<Vec<Report>, StoreError>;
    async fn search_reports_count(&self, params: &SearchParams) -> Result<i64, StoreError>;
}

/// Site-wide settings as string key/value pairs
#[async_trait]
pub trait MetaStore: Send + Sync {
    async fn get_meta_data(&self) -> Result<BTreeMap<String, String>, StoreError>;
    async fn get_meta_value(&self, key: &str) -> Result<String, StoreError>;
    /// Insert or overwrite every entry of `data`
    async fn put_meta_data(&self, data: &BTreeMap<String, String>) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Messages exchanged between `a` and `b` in either direction, newest first
    async fn get_chat_msg_list(&self, a: i64, b: i64, page: i64, size: i64) -> Result<Vec<ChatMessage>, StoreError>;
    async fn get_chat_message(&self, id: i64) -> Result<ChatMessage, StoreError>;
    async fn create_chat_message(&self, message: &mut ChatMessage) -> Result<(), StoreError>;
    /// Mark everything `from` sent to `to` as read, returning how many changed
    async fn set_chat_msg_read(&self, from: i64, to: i64) -> Result<u64, StoreError>;
    /// The latest message of each conversation `uid` takes part in, newest first
    async fn get_chat_user_list(&self, uid: i64, page: i64, size: i64) -> Result<Vec<ChatMessage>, StoreError>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// A handle on which every call runs in one new transaction.
    ///
    /// Dropping the handle without [`TransactionStore::commit`] rolls the
    /// transaction back.
    async fn begin(&self) -> Result<Box<dyn Store>, StoreError>;

    /// Commit the transaction opened by `begin`; a no-op on a handle without one
    async fn commit(&self) -> Result<(), StoreError>;
}

/// Every storage capability the forum needs
pub trait Store:
    UserStore
    + DiscussionStore
    + PostStore
    + LikeStore
    + TagStore
    + NotificationStore
    + ReportStore
    + AdminStore
    + MetaStore
    + ChatStore
    + TransactionStore
{
}

impl<T> Store for T where
    T: UserStore
        + DiscussionStore
        + PostStore
        + LikeStore
        + TagStore
        + NotificationStore
        + ReportStore
        + AdminStore
        + MetaStore
        + ChatStore
        + TransactionStore
{
}

type SharedTransaction = Arc<Mutex<Option<Transaction<'static, Sqlite>>>>;

/// SQLite implementation of [`Store`]
///
/// A store returned by `begin` shares one open transaction between its
/// clones; all others check a connection out of the pool per query.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    tx: Option<SharedTransaction>,
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore")
            .field("pool", &self.pool)
            .field("in_transaction", &self.tx.is_some())
            .finish()
    }
}

/// A connection checked out for one query
pub(crate) enum Conn<'a> {
    Pooled(PoolConnection<Sqlite>),
    Tx(MappedMutexGuard<'a, SqliteConnection>),
}

impl Deref for Conn<'_> {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        match self {
            Conn::Pooled(conn) => conn,
            Conn::Tx(conn) => conn,
        }
    }
}

impl DerefMut for Conn<'_> {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        match self {
            Conn::Pooled(conn) => conn,
            Conn::Tx(conn) => conn,
        }
    }
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, tx: None }
    }

    /// The connection the next query runs on
    pub(crate) async fn conn(&self) -> Result<Conn<'_>, StoreError> {
        match &self.tx {
            None => Ok(Conn::Pooled(self.pool.acquire().await?)),
            Some(tx) => MutexGuard::try_map(tx.lock().await, |tx| tx.as_deref_mut())
                .map(Conn::Tx)
                .map_err(|_| StoreError::Transaction("already finished")),
        }
    }

    /// Connect to `url`, enable foreign keys and run the embedded migrations
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database...");
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;
        tracing::info!("Database connection pool created successfully");

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// A private in-memory database, migrated and ready to use
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TransactionStore for SqliteStore {
    async fn begin(&self) -> Result<Box<dyn Store>, StoreError> {
        if self.tx.is_some() {
            return Err(StoreError::Transaction("already open"));
        }
        let tx = self.pool.begin().await?;
        Ok(Box::new(Self {
            pool: self.pool.clone(),
            tx: Some(Arc::new(Mutex::new(Some(tx)))),
        }))
    }

    async fn commit(&self) -> Result<(), StoreError> {
        let Some(tx) = &self.tx else {
            return Ok(());
        };
        let tx = tx
            .lock()
            .await
            .take()
            .ok_or(StoreError::Transaction("already finished"))?;
        tx.commit().await?;
        Ok(())
    }
}

/// Positive, distinct ids in first-seen order
pub(crate) fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    let mut out: Vec<i64> = Vec::with_capacity(ids.len());
    for &id in ids {
        if id > 0 && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
