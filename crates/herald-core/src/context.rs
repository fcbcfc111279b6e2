//! Request context types.
//!
//! The [`RequestContext`] carries the per-request data the error normalizer
//! needs for correlation: an id attached by code running earlier in the same
//! process, and the inbound header map.

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The header name for request ID propagation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A unique identifier for each request, using UUID v7.
///
/// UUID v7 is time-ordered, which makes it ideal for request tracking
/// and log correlation. Hosts that assign ids in an upstream stage can store
/// a `RequestId` in the request extensions; [`RequestContext::from_parts`]
/// picks it up.
///
/// # Example
///
/// ```
/// use herald_core::RequestId;
///
/// let id = RequestId::new();
/// println!("Request ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RequestId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Per-request data consumed by the error normalizer.
///
/// # Example
///
/// ```
/// use herald_core::RequestContext;
///
/// let ctx = RequestContext::new()
///     .with_header("x-request-id", "from-proxy")
///     .with_request_id("from-app");
///
/// // Ids attached in-process win over inbound headers.
/// assert_eq!(ctx.correlation_id(), Some("from-app"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Identifier attached by in-process code.
    request_id: Option<String>,

    /// Inbound request headers.
    headers: HeaderMap,
}

impl RequestContext {
    /// Creates an empty context: no request id, no headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from HTTP request parts.
    ///
    /// Headers are copied. A [`RequestId`] found in the request extensions
    /// becomes the context's request id.
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self {
            request_id: parts
                .extensions
                .get::<RequestId>()
                .map(ToString::to_string),
            headers: parts.headers.clone(),
        }
    }

    /// Returns a new context with the specified request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Returns a new context with the specified headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Returns a new context with one more header value appended.
    ///
    /// Invalid header names or values are ignored.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            http::header::HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Returns the in-process request id, if set.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Sets the in-process request id.
    pub fn set_request_id(&mut self, request_id: impl Into<String>) {
        self.request_id = Some(request_id.into());
    }

    /// Returns the inbound headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolves the correlation id for this request.
    ///
    /// Checks, in order, the in-process request id and the first
    /// `x-request-id` header value. Empty values and non-UTF-8 header values
    /// count as absent.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.request_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.headers
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .filter(|id| !id.is_empty())
            })
    }
}
