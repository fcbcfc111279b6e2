//! Envelope builders.
//!
//! Each builder assembles one envelope, then calls
//! [`ResponseSink::set_status`] once and [`ResponseSink::send_body`] once, in
//! that order, and hands the sink back. Inputs are not validated.
//!
//! | Builder | Status | `success` |
//! |---|---|---|
//! | [`success`] / [`success_with`] | caller (default 200) | `true` |
//! | [`paginated`] / [`paginated_with_message`] | 200 | `true` |
//! | [`validation_error`] | 422 | `false` |
//! | [`error`] / [`error_with`] | caller (default 500) | `false` |
//!
//! # Example
//!
//! ```
//! use herald_middleware::{respond, HttpResponseSink};
//! use serde_json::json;
//!
//! let mut sink = HttpResponseSink::new();
//! respond::success(&mut sink, json!({"id": 1, "name": "John"}));
//!
//! let body = sink.body().unwrap();
//! assert_eq!(body["success"], true);
//! assert_eq!(body["statusCode"], 200);
//! assert_eq!(body["message"], "Success");
//! ```

use herald_core::error::messages;
use herald_core::{
    generate_meta, ErrorEnvelope, MetaExtras, PageParams, PaginatedEnvelope, Pagination,
    SuccessEnvelope, ValidationErrorEnvelope, ValidationErrorItem,
};
use serde::Serialize;
use serde_json::Value;

use crate::sink::ResponseSink;

/// Optional inputs of [`success_with`].
#[derive(Debug, Clone)]
pub struct SuccessOptions {
    message: String,
    status_code: u16,
    meta: MetaExtras,
}

impl Default for SuccessOptions {
    fn default() -> Self {
        Self {
            message: messages::SUCCESS.to_string(),
            status_code: 200,
            meta: MetaExtras::new(),
        }
    }
}

impl SuccessOptions {
    /// Creates options with message `"Success"` and status 200.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the status code.
    #[must_use]
    pub fn status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Replaces the extra metadata entries.
    #[must_use]
    pub fn meta(mut self, meta: MetaExtras) -> Self {
        self.meta = meta;
        self
    }

    /// Adds one extra metadata entry.
    #[must_use]
    pub fn meta_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}

/// Optional inputs of [`error_with`].
#[derive(Debug, Clone)]
pub struct ErrorOptions {
    message: String,
    status_code: u16,
    errors: Option<Value>,
    meta: MetaExtras,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            message: messages::AN_ERROR_OCCURRED.to_string(),
            status_code: 500,
            errors: None,
            meta: MetaExtras::new(),
        }
    }
}

impl ErrorOptions {
    /// Creates options with message `"An error occurred"` and status 500.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the status code.
    #[must_use]
    pub fn status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Attaches error details (array or object). `Value::Null` clears them.
    #[must_use]
    pub fn errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors).filter(|v| !v.is_null());
        self
    }

    /// Replaces the extra metadata entries.
    #[must_use]
    pub fn meta(mut self, meta: MetaExtras) -> Self {
        self.meta = meta;
        self
    }

    /// Adds one extra metadata entry.
    #[must_use]
    pub fn meta_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}

/// Sends a success envelope with message `"Success"` and status 200.
pub fn success<S: ResponseSink>(sink: &mut S, data: Value) -> &mut S {
    success_with(sink, data, SuccessOptions::default())
}

/// Sends a success envelope.
pub fn success_with<S: ResponseSink>(sink: &mut S, data: Value, options: SuccessOptions) -> &mut S {
    let envelope = SuccessEnvelope::new(
        options.status_code,
        options.message,
        data,
        generate_meta(Some(&options.meta)),
    );
    send(sink, envelope.status_code, &envelope)
}

/// Sends a paginated envelope with message `"Success"`.
pub fn paginated<S: ResponseSink>(sink: &mut S, data: Vec<Value>, params: PageParams) -> &mut S {
    paginated_with_message(sink, data, params, messages::SUCCESS)
}

/// Sends a paginated envelope with a custom message. Status is always 200.
pub fn paginated_with_message<S: ResponseSink>(
    sink: &mut S,
    data: Vec<Value>,
    params: PageParams,
    message: impl Into<String>,
) -> &mut S {
    let envelope = PaginatedEnvelope::new(
        message,
        data,
        Pagination::from_params(params),
        generate_meta(None),
    );
    send(sink, envelope.status_code, &envelope)
}

/// Sends a validation-error envelope. Status is always 422.
pub fn validation_error<S: ResponseSink>(sink: &mut S, errors: Vec<ValidationErrorItem>) -> &mut S {
    let envelope = ValidationErrorEnvelope::new(errors, generate_meta(None));
    send(sink, envelope.status_code, &envelope)
}

/// Sends a generic error envelope with the given message and status.
pub fn error<S: ResponseSink>(sink: &mut S, message: impl Into<String>, status_code: u16) -> &mut S {
    error_with(sink, ErrorOptions::new().message(message).status_code(status_code))
}

/// Sends a generic error envelope.
///
/// `errors` appears in the body only when set in `options`.
pub fn error_with<S: ResponseSink>(sink: &mut S, options: ErrorOptions) -> &mut S {
    let mut envelope = ErrorEnvelope::new(
        options.status_code,
        options.message,
        generate_meta(Some(&options.meta)),
    );
    if let Some(errors) = options.errors {
        envelope = envelope.with_errors(errors);
    }
    send(sink, envelope.status_code, &envelope)
}

/// Sends an already-built error envelope.
pub fn send_error<'s, S: ResponseSink>(sink: &'s mut S, envelope: &ErrorEnvelope) -> &'s mut S {
    send(sink, envelope.status_code, envelope)
}

fn send<'s, S: ResponseSink, T: Serialize>(sink: &'s mut S, status_code: u16, envelope: &T) -> &'s mut S {
    let body = serde_json::to_value(envelope).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to encode response envelope");
        Value::Null
    });
    sink.set_status(status_code).send_body(body)
}
