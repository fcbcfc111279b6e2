//! Recording response sink.

use herald_middleware::ResponseSink;
use serde_json::Value;

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    /// `set_status` was called.
    Status(u16),
    /// `send_body` was called.
    Body(Value),
}

/// A [`ResponseSink`] that records every call in order.
///
/// # Example
///
/// ```
/// use herald_middleware::respond;
/// use herald_test::RecordingSink;
/// use serde_json::json;
///
/// let mut sink = RecordingSink::new();
/// respond::success(&mut sink, json!({"id": 1}));
///
/// sink.assert_single_response();
/// assert_eq!(sink.status(), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Returns the last status set, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::Status(status) => Some(*status),
            SinkCall::Body(_) => None,
        })
    }

    /// Returns the last body sent, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::Body(body) => Some(body),
            SinkCall::Status(_) => None,
        })
    }

    /// Asserts that exactly one status was set, then exactly one body was
    /// sent.
    ///
    /// # Panics
    ///
    /// Panics if the recorded calls are anything other than
    /// `[Status, Body]`.
    pub fn assert_single_response(&self) -> &Self {
        assert!(
            matches!(
                self.calls.as_slice(),
                [SinkCall::Status(_), SinkCall::Body(_)]
            ),
            "Expected one status followed by one body, got {:?}",
            self.calls
        );
        self
    }
}

impl ResponseSink for RecordingSink {
    fn set_status(&mut self, status_code: u16) -> &mut Self {
        self.calls.push(SinkCall::Status(status_code));
        self
    }

    fn send_body(&mut self, body: Value) -> &mut Self {
        self.calls.push(SinkCall::Body(body));
        self
    }
}
