//! Wire envelope records.
//!
//! Herald emits exactly four response shapes. Each is a plain serializable
//! record whose `success` flag is fixed by its constructor:
//!
//! ```text
//! Success:      {success:true,  statusCode, message, data, meta}
//! Paginated:    {success:true,  statusCode:200, message, data:[..], pagination, meta}
//! ValidationErr:{success:false, statusCode:422, message:"Validation failed", errors:[..], meta}
//! GenericError: {success:false, statusCode, message, errors?, code?, stack?, meta}
//! ```
//!
//! Optional fields of the generic error envelope are omitted from the JSON
//! when absent, never written as `null`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::messages;
use crate::meta::ResponseMeta;
use crate::pagination::Pagination;

/// Envelope for a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope {
    /// Always `true`.
    pub success: bool,
    /// HTTP status code.
    pub status_code: u16,
    /// Human-readable message.
    pub message: String,
    /// Response payload.
    pub data: Value,
    /// Response metadata.
    pub meta: ResponseMeta,
}

impl SuccessEnvelope {
    /// Creates a success envelope.
    #[must_use]
    pub fn new(status_code: u16, message: impl Into<String>, data: Value, meta: ResponseMeta) -> Self {
        Self {
            success: true,
            status_code,
            message: message.into(),
            data,
            meta,
        }
    }
}

/// Envelope for one page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Always 200.
    pub status_code: u16,
    /// Human-readable message.
    pub message: String,
    /// Items on this page.
    pub data: Vec<Value>,
    /// Derived pagination block.
    pub pagination: Pagination,
    /// Response metadata.
    pub meta: ResponseMeta,
}

impl PaginatedEnvelope {
    /// Creates a paginated envelope with status 200.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        data: Vec<Value>,
        pagination: Pagination,
        meta: ResponseMeta,
    ) -> Self {
        Self {
            success: true,
            status_code: 200,
            message: message.into(),
            data,
            pagination,
            meta,
        }
    }
}

/// A single field-level validation failure.
///
/// Additional caller fields (for example `value` or `rule`) are carried in
/// `extra` and flattened into the item on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorItem {
    /// Path of the offending field.
    pub field: String,
    /// Why the field was rejected.
    pub message: String,
    /// Any additional caller-supplied fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ValidationErrorItem {
    /// Creates an item without extra fields.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            extra: IndexMap::new(),
        }
    }

    /// Adds an extra field to the item.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Envelope for rejected input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// Always 422.
    pub status_code: u16,
    /// Always `"Validation failed"`.
    pub message: String,
    /// Field-level failures, possibly empty.
    pub errors: Vec<ValidationErrorItem>,
    /// Response metadata.
    pub meta: ResponseMeta,
}

impl ValidationErrorEnvelope {
    /// Creates a validation-error envelope with status 422.
    #[must_use]
    pub fn new(errors: Vec<ValidationErrorItem>, meta: ResponseMeta) -> Self {
        Self {
            success: false,
            status_code: 422,
            message: messages::VALIDATION_FAILED.to_string(),
            errors,
            meta,
        }
    }
}

/// Generic error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// HTTP status code.
    pub status_code: u16,
    /// Human-readable message.
    pub message: String,
    /// Error details, array or object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Diagnostic stack trace (non-production only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Response metadata.
    pub meta: ResponseMeta,
}

impl ErrorEnvelope {
    /// Creates an error envelope without errors, code or stack.
    #[must_use]
    pub fn new(status_code: u16, message: impl Into<String>, meta: ResponseMeta) -> Self {
        Self {
            success: false,
            status_code,
            message: message.into(),
            errors: None,
            code: None,
            stack: None,
            meta,
        }
    }

    /// Attaches error details. `Value::Null` leaves `errors` unset.
    #[must_use]
    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors).filter(|v| !v.is_null());
        self
    }

    /// Attaches a machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attaches a stack trace.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
