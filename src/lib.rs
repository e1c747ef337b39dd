//! Kawa Forum
//!
//! A discussion forum backend: users, discussions, posts, likes, tags,
//! notifications and reports over a JSON HTTP API.
//!
//! # Module Structure
//!
//! - **`shared`** - Forum records, pagination, the response envelope,
//!   configuration and validation errors. Compiled without the server stack.
//! - **`backend`** - Axum server, SQLite store, sessions and the event bus
//!   (only compiled with the `ssr` feature, on by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use kawa_forum::backend::server::create_app;
//! use kawa_forum::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
