//! # Herald
//!
//! **Standard REST response envelopes and error normalization**
//!
//! Herald gives every route handler the same response shape:
//!
//! - Success, paginated, validation-error and generic error envelopes, each
//!   carrying a `meta.timestamp`
//! - A typed operational error ([`AppError`](core::AppError)) whose status,
//!   code and message are always safe to show to callers
//! - An error normalizer that turns any failure into an error envelope and
//!   redacts unknown 500-class failures in production
//!
//! ## Quick Start
//!
//! ```
//! use herald::prelude::*;
//! use serde_json::json;
//!
//! fn find_user(id: u64) -> Result<serde_json::Value, AppError> {
//!     if id == 1 {
//!         Ok(json!({"id": 1, "name": "John"}))
//!     } else {
//!         Err(AppError::not_found())
//!     }
//! }
//!
//! let normalizer = ErrorNormalizer::production();
//! let ctx = RequestContext::new().with_header("x-request-id", "abc-123");
//!
//! let mut sink = HttpResponseSink::new();
//! match find_user(2) {
//!     Ok(user) => {
//!         respond::success(&mut sink, user);
//!     }
//!     Err(err) => {
//!         normalizer.handle(err, &ctx, &mut sink);
//!     }
//! }
//!
//! let response = sink.into_response();
//! assert_eq!(response.status(), 404);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Handler ──ok──→ respond::* ─────────┐
//!    │                                ├──→ ResponseSink ──→ host response
//!    └──err──→ ErrorNormalizer ───────┘
//! ```

#![doc(html_root_url = "https://docs.rs/herald/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use herald_core as core;

// Re-export builders, sinks and the normalizer
pub use herald_middleware as middleware;

// Re-export configuration
pub use herald_config as config;

// Re-export logging setup
pub use herald_telemetry as telemetry;

// The builders are used as `respond::success(..)`.
pub use herald_middleware::respond;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use herald::prelude::*;
///
/// let err = AppError::conflict("Email already registered");
/// assert_eq!(err.status_code(), 409);
/// ```
pub mod prelude {
    pub use herald_core::{
        generate_meta, AppError, DeploymentMode, ErrorEnvelope, Failure, MetaExtras, PageParams,
        Pagination, RequestContext, RequestId, ResponseMeta, UnknownFailure, ValidationErrorItem,
    };

    pub use herald_middleware::respond;
    pub use herald_middleware::{
        ErrorNormalizer, ErrorOptions, HttpResponseSink, ModeSource, ResponseSink, SuccessOptions,
    };

    pub use herald_config::{ConfigLoader, HeraldConfig};
}
