//! Shared Error Types
//!
//! Errors raised while validating the shared forum records.
//! The backend maps them onto HTTP statuses.
//!
//! # Usage
//!
//! ```rust
//! use kawa_forum::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "title cannot be empty");
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        message: String,
    },
}

impl SharedError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
