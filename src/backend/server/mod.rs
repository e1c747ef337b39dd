//! Server Module
//!
//! - **`config`** - opening the store from `AppConfig`
//! - **`state`** - `AppState` and the transactional `publish`
//! - **`init`** - application assembly

pub mod config;
pub mod init;
pub mod state;

pub use init::{app_with_events, app_with_store, create_app};
pub use state::AppState;
