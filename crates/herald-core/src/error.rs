//! Operational application errors.
//!
//! This module provides [`AppError`], the error type application code returns
//! when it wants a failure reported to the caller *as is*. An `AppError` is
//! always operational: its status, code and message are considered safe to
//! disclose in every deployment mode.
//!
//! # Named Constructors
//!
//! | Constructor | Status | Code | Default message |
//! |---|---|---|---|
//! | [`AppError::bad_request`] | 400 | `BAD_REQUEST` | (required) |
//! | [`AppError::unauthorized`] | 401 | `UNAUTHORIZED` | `Unauthorized` |
//! | [`AppError::forbidden`] | 403 | `FORBIDDEN` | `Forbidden` |
//! | [`AppError::not_found`] | 404 | `NOT_FOUND` | `Resource not found` |
//! | [`AppError::conflict`] | 409 | `CONFLICT` | (required) |
//! | [`AppError::internal`] | 500 | `INTERNAL_ERROR` | `Internal server error` |
//!
//! Codes and messages can be overridden at construction with
//! [`AppError::with_code`] and [`AppError::with_message`].

use std::backtrace::Backtrace;
use std::sync::Arc;

use thiserror::Error;

use crate::envelope::ErrorEnvelope;
use crate::meta::ResponseMeta;

/// Default machine-readable error codes.
pub mod codes {
    /// 400 Bad Request.
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    /// 401 Unauthorized.
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    /// 403 Forbidden.
    pub const FORBIDDEN: &str = "FORBIDDEN";
    /// 404 Not Found.
    pub const NOT_FOUND: &str = "NOT_FOUND";
    /// 409 Conflict.
    pub const CONFLICT: &str = "CONFLICT";
    /// 500 and every unknown failure.
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Default human-readable messages.
pub mod messages {
    /// Default message for [`super::AppError::unauthorized`].
    pub const UNAUTHORIZED: &str = "Unauthorized";
    /// Default message for [`super::AppError::forbidden`].
    pub const FORBIDDEN: &str = "Forbidden";
    /// Default message for [`super::AppError::not_found`].
    pub const NOT_FOUND: &str = "Resource not found";
    /// Default message for [`super::AppError::internal`], and the redacted
    /// message for unknown 500 failures in production.
    pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
    /// Fallback for unknown failures that carry no message.
    pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
    /// Default message of the generic error builder.
    pub const AN_ERROR_OCCURRED: &str = "An error occurred";
    /// Fixed message of validation-error envelopes.
    pub const VALIDATION_FAILED: &str = "Validation failed";
    /// Default message of success envelopes.
    pub const SUCCESS: &str = "Success";
}

/// Operational application error.
///
/// # Example
///
/// ```
/// use herald_core::AppError;
///
/// fn find_user(id: u64) -> Result<String, AppError> {
///     if id == 0 {
///         return Err(AppError::not_found().with_message("User not found").with_code("USER_NOT_FOUND"));
///     }
///     Ok("alice".to_string())
/// }
///
/// let err = find_user(0).unwrap_err();
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.code(), "USER_NOT_FOUND");
/// assert!(err.is_operational());
/// ```
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct AppError {
    message: String,
    status_code: u16,
    code: String,
    stack: Arc<Backtrace>,
}

impl AppError {
    /// Creates an error with status 500 and code `INTERNAL_ERROR`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_parts(message, 500, codes::INTERNAL_ERROR)
    }

    /// Creates an error from all three value fields.
    #[must_use]
    pub fn with_parts(message: impl Into<String>, status_code: u16, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            code: code.into(),
            stack: Arc::new(Backtrace::capture()),
        }
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_parts(message, 400, codes::BAD_REQUEST)
    }

    /// 401 Unauthorized.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::with_parts(messages::UNAUTHORIZED, 401, codes::UNAUTHORIZED)
    }

    /// 403 Forbidden.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::with_parts(messages::FORBIDDEN, 403, codes::FORBIDDEN)
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found() -> Self {
        Self::with_parts(messages::NOT_FOUND, 404, codes::NOT_FOUND)
    }

    /// 409 Conflict.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_parts(message, 409, codes::CONFLICT)
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal() -> Self {
        Self::with_parts(messages::INTERNAL_SERVER_ERROR, 500, codes::INTERNAL_ERROR)
    }

    /// Replaces the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replaces the machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Replaces the HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the machine-readable code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Always `true`: an `AppError` is a foreseen failure, never a defect.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        true
    }

    /// Returns the backtrace captured at construction.
    ///
    /// Only populated when `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` enables
    /// capture.
    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.stack
    }

    /// Converts this error into a generic error envelope.
    ///
    /// The stack is never included: operational envelopes expose exactly
    /// status, code and message.
    #[must_use]
    pub fn to_envelope(&self, meta: ResponseMeta) -> ErrorEnvelope {
        ErrorEnvelope::new(self.status_code, self.message.clone(), meta).with_code(self.code.clone())
    }
}
