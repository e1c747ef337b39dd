/**
 * Backend Error Types
 *
 * Every HTTP handler returns `Result<_, BackendError>`. Lower layers keep
 * their own error enums and convert through `From`, so handlers can use `?`.
 *
 * # Status Mapping
 *
 * - `HandlerError` - the status chosen by the handler
 * - `StoreError::NotFound` - 404
 * - `StoreError::Conflict` - 409
 * - any other store failure, including a failed event handler, is 500
 *   with details only in the log
 * - `SharedError::ValidationError` - 400
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request rejected by a handler (bad input, missing session, no permission)
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    #[error(transparent)]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message, sent to the client as is
    ///
    /// # Example
    ///
    /// ```rust
    /// use kawa_forum::backend::error::BackendError;
    /// use axum::http::StatusCode;
    ///
    /// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
    /// ```
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StoreError(err) => match err {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StoreError(StoreError::NotFound) => "not found".to_string(),
            Self::StoreError(StoreError::Conflict(what)) => what.clone(),
            Self::StoreError(_) => "internal server error".to_string(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

/// Replace a store `NotFound` with a handler error carrying `message`
pub trait OrNotFound<T> {
    fn or_not_found(self, message: &str) -> Result<T, BackendError>;
}

impl<T> OrNotFound<T> for Result<T, StoreError> {
    fn or_not_found(self, message: &str) -> Result<T, BackendError> {
        self.map_err(|err| match err {
            StoreError::NotFound => BackendError::not_found(message),
            other => BackendError::from(other),
        })
    }
}
