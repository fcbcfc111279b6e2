//! Response sinks.
//!
//! A [`ResponseSink`] is the write-only capability Herald needs from a host
//! framework's response object: set a status, send a body. Builders and the
//! error normalizer call each method exactly once, status first.
//!
//! [`HttpResponseSink`] is the built-in sink that produces an
//! `http::Response<Full<Bytes>>`.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::Full;
use serde_json::Value;

/// The HTTP response type produced by [`HttpResponseSink`].
///
/// This is a standard `http::Response` with a `Full<Bytes>` body.
pub type Response = http::Response<Full<Bytes>>;

/// Content type of every envelope.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Write-only response capability.
///
/// Both methods return the sink so calls can be chained.
///
/// # Example
///
/// ```
/// use herald_middleware::ResponseSink;
/// use serde_json::Value;
///
/// #[derive(Default)]
/// struct Captured {
///     status: u16,
///     body: Value,
/// }
///
/// impl ResponseSink for Captured {
///     fn set_status(&mut self, status_code: u16) -> &mut Self {
///         self.status = status_code;
///         self
///     }
///
///     fn send_body(&mut self, body: Value) -> &mut Self {
///         self.body = body;
///         self
///     }
/// }
///
/// let mut sink = Captured::default();
/// sink.set_status(204).send_body(Value::Null);
/// assert_eq!(sink.status, 204);
/// ```
pub trait ResponseSink {
    /// Records the HTTP status code.
    fn set_status(&mut self, status_code: u16) -> &mut Self;

    /// Sends the structured response body.
    fn send_body(&mut self, body: Value) -> &mut Self;
}

/// Sink that accumulates a status and body and converts them into an
/// [`http::Response`].
#[derive(Debug, Clone, Default)]
pub struct HttpResponseSink {
    status_code: Option<u16>,
    body: Option<Value>,
}

impl HttpResponseSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded status code, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns the recorded body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Builds the HTTP response.
    ///
    /// A missing status becomes 200 and a missing body becomes `null`.
    /// Status codes outside `100..=999` are replaced by 500.
    #[must_use]
    pub fn into_response(self) -> Response {
        let raw_status = self.status_code.unwrap_or(200);
        let status = StatusCode::from_u16(raw_status).unwrap_or_else(|_| {
            tracing::warn!(
                http.status_code = raw_status,
                "Invalid status code in envelope, responding with 500"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        });

        let body = self.body.unwrap_or(Value::Null);
        let bytes = match serde_json::to_vec(&body) {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize envelope body");
                Bytes::from_static(b"null")
            }
        };

        let mut response = http::Response::new(Full::new(bytes));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        response
    }
}

impl ResponseSink for HttpResponseSink {
    fn set_status(&mut self, status_code: u16) -> &mut Self {
        self.status_code = Some(status_code);
        self
    }

    fn send_body(&mut self, body: Value) -> &mut Self {
        self.body = Some(body);
        self
    }
}
