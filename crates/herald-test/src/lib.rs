//! # Herald Test
//!
//! Test utilities for code that emits Herald envelopes.
//!
//! - [`RecordingSink`] - A [`ResponseSink`](herald_middleware::ResponseSink)
//!   that records every call, for checking builders and the normalizer
//!   without an HTTP stack
//! - [`TestResponse`] - A collected `http::Response` with envelope assertions
//! - [`envelope`] - Assertions on decoded envelope JSON
//!
//! ## Example
//!
//! ```
//! use herald_core::{AppError, RequestContext};
//! use herald_middleware::ErrorNormalizer;
//! use herald_test::{envelope, RecordingSink};
//!
//! let mut sink = RecordingSink::new();
//! ErrorNormalizer::production().handle(AppError::forbidden(), &RequestContext::new(), &mut sink);
//!
//! sink.assert_single_response();
//! envelope::assert_error_envelope(sink.body().unwrap(), 403, "Forbidden");
//! ```

#![doc(html_root_url = "https://docs.rs/herald-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod envelope;
mod error;
mod response;
mod sink;

pub use error::TestError;
pub use response::TestResponse;
pub use sink::{RecordingSink, SinkCall};
