//! Failure classification.
//!
//! Everything a handler can fail with is folded into the closed [`Failure`]
//! union before it reaches the error normalizer:
//!
//! - [`Failure::Operational`] wraps an [`AppError`], whose status, code and
//!   message are safe to disclose.
//! - [`Failure::Unknown`] wraps an [`UnknownFailure`]: anything else, treated
//!   as a potential defect.
//!
//! Conversions from `anyhow::Error` and boxed `std::error::Error` values
//! downcast to [`AppError`] first, so an operational error that travelled
//! through `?` inside a generic error type is still recognized.

use std::backtrace::BacktraceStatus;
use std::error::Error as StdError;

use crate::error::AppError;

/// Closed set of failure kinds handled by the error normalizer.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Expected, disclosure-safe failure.
    Operational(AppError),
    /// Anything not recognized as operational.
    Unknown(UnknownFailure),
}

impl Failure {
    /// Returns `true` for [`Failure::Operational`].
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(self, Self::Operational(_))
    }

    /// Returns the status the failure resolves to: the operational status,
    /// the unknown failure's own status, or 500.
    #[must_use]
    pub fn effective_status(&self) -> u16 {
        match self {
            Self::Operational(err) => err.status_code(),
            Self::Unknown(unknown) => unknown.effective_status(),
        }
    }

    /// Classifies an arbitrary error reference.
    ///
    /// `AppError` references are cloned into [`Failure::Operational`];
    /// everything else becomes an [`UnknownFailure`] carrying the error's
    /// display message.
    #[must_use]
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        match err.downcast_ref::<AppError>() {
            Some(app) => Self::Operational(app.clone()),
            None => Self::Unknown(UnknownFailure::from_error(err)),
        }
    }
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Self::Operational(err)
    }
}

impl From<UnknownFailure> for Failure {
    fn from(unknown: UnknownFailure) -> Self {
        Self::Unknown(unknown)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => Self::Operational(app),
            Err(err) => {
                let mut unknown = UnknownFailure::new().with_message(err.to_string());
                let backtrace = err.backtrace();
                if backtrace.status() == BacktraceStatus::Captured {
                    unknown = unknown.with_stack(backtrace.to_string());
                }
                Self::Unknown(unknown)
            }
        }
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Failure {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => Self::Operational(*app),
            Err(err) => Self::Unknown(UnknownFailure::from_error(&*err)),
        }
    }
}

/// A failure that is not an [`AppError`].
///
/// Every attribute is optional: an unknown failure may or may not carry its
/// own status, message or stack.
///
/// # Example
///
/// ```
/// use herald_core::{Failure, UnknownFailure};
///
/// let failure: Failure = UnknownFailure::new()
///     .with_message("upstream returned 404")
///     .with_status(404)
///     .into();
///
/// assert!(!failure.is_operational());
/// assert_eq!(failure.effective_status(), 404);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFailure {
    status_code: Option<u16>,
    message: Option<String>,
    stack: Option<String>,
}

impl UnknownFailure {
    /// Creates an unknown failure with no status, message or stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unknown failure from an error's display message.
    #[must_use]
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        Self::new().with_message(err.to_string())
    }

    /// Sets the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets an explicit HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Sets the stack trace.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Returns the explicit status code, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns the explicit status code, or 500.
    #[must_use]
    pub fn effective_status(&self) -> u16 {
        self.status_code.unwrap_or(500)
    }

    /// Returns the message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the stack trace, if any.
    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}
