//! Shared Module
//!
//! Types shared by the store, the event handlers and the HTTP layer. None of
//! them depend on the server stack, so they can also be used by API clients.

/// Forum records (users, discussions, posts, likes, tags, ...)
pub mod forum;

/// Page/size/include query parsing
pub mod pagination;

/// Response envelope with side tables
pub mod payload;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

pub use error::SharedError;
pub use pagination::PageQuery;
pub use payload::{Payload, SearchPage};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
