//! Middleware Module
//!
//! - **`auth`** - session extractors for handlers

pub mod auth;

pub use auth::{MaybeUser, SessionUser};
