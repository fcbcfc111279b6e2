//! # Herald Middleware
//!
//! Response envelope builders and the error normalization stage.
//!
//! Route handlers either build a response directly with one of the
//! [`respond`] builders, or fail. Failures are handed to the
//! [`ErrorNormalizer`], which classifies them and writes a standard error
//! envelope.
//!
//! ```text
//! Handler ──ok──→ respond::{success, paginated, validation_error, error} ──→ Sink
//!    │
//!    └──err──→ ErrorNormalizer ──→ Sink
//! ```
//!
//! Both paths write through the [`ResponseSink`] trait. [`HttpResponseSink`]
//! adapts it to `http::Response`.
//!
//! ## Example
//!
//! ```
//! use herald_core::{RequestContext, UnknownFailure};
//! use herald_middleware::ErrorNormalizer;
//!
//! let normalizer = ErrorNormalizer::production();
//! let response = normalizer.into_response(
//!     UnknownFailure::new().with_message("Sensitive details"),
//!     &RequestContext::new(),
//! );
//!
//! assert_eq!(response.status(), 500);
//! ```

#![doc(html_root_url = "https://docs.rs/herald-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod respond;
pub mod sink;
pub mod stages;

// Re-export main types at crate root
pub use respond::{ErrorOptions, SuccessOptions};
pub use sink::{HttpResponseSink, Response, ResponseSink, JSON_CONTENT_TYPE};
pub use stages::{ErrorNormalizer, ModeSource, REQUEST_ID_META_KEY};
