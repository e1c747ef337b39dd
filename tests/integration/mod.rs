//! Integration tests against the full router and an in-memory database

pub mod api;
pub mod database;
