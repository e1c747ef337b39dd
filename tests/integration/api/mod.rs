//! API integration tests
//!
//! Integration tests for all API endpoints

mod admin_test;
mod auth_test;
mod chat_test;
mod discussion_test;
mod like_test;
mod meta_test;
mod notification_test;
mod router_test;
