//! Backend Module
//!
//! Axum HTTP server for the forum, compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Signup, login, JWT sessions, password hashing
//! - **`middleware`** - Session extractors
//! - **`forum`** - Discussion, post, like, tag, user, notification, report
//!   and admin handlers
//! - **`store`** - Storage traits and the SQLite implementation
//! - **`events`** - In-process event bus keeping counters and notifications
//!   in step with writes
//! - **`spam`** - Sensitive word filter
//! - **`error`** - Backend-specific error types
//!
//! # Request Flow
//!
//! ```text
//! route handler
//!   -> SessionUser / MaybeUser (JWT bearer -> User)
//!   -> validation (role, silenced, content filter, body)
//!   -> Store::begin (SQLite transaction)
//!   -> primary write, then EventBus::dispatch on the same transaction
//!   -> commit
//!   -> JSON response
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and sessions
pub mod auth;

/// Request extractors
pub mod middleware;

/// Forum HTTP handlers
pub mod forum;

/// Persistence
pub mod store;

/// Forum events
pub mod events;

/// Content filter
pub mod spam;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use events::{EventBus, ForumEvent};
pub use server::{app_with_store, create_app, AppState};
pub use store::{SqliteStore, Store, StoreError};
