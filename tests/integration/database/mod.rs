//! Store-level tests against a migrated in-memory database

mod migrations_test;
