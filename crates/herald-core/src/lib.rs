//! # Herald Core
//!
//! Core types for the Herald response layer.
//!
//! This crate provides the foundational types used throughout Herald:
//!
//! - [`ResponseMeta`] - Timestamped metadata attached to every envelope
//! - [`AppError`] - Operational application error with status, code and message
//! - [`Failure`] - Closed classification of anything a handler can fail with
//! - [`SuccessEnvelope`], [`PaginatedEnvelope`], [`ValidationErrorEnvelope`],
//!   [`ErrorEnvelope`] - The four wire shapes
//! - [`Pagination`] - Derived pagination block
//! - [`RequestContext`] / [`RequestId`] - Per-request correlation data
//! - [`DeploymentMode`] - Disclosure-policy switch

#![doc(html_root_url = "https://docs.rs/herald-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
pub mod envelope;
pub mod error;
mod failure;
mod meta;
mod mode;
mod pagination;

pub use context::{RequestContext, RequestId, REQUEST_ID_HEADER};
pub use envelope::{
    ErrorEnvelope, PaginatedEnvelope, SuccessEnvelope, ValidationErrorEnvelope,
    ValidationErrorItem,
};
pub use error::AppError;
pub use failure::{Failure, UnknownFailure};
pub use meta::{generate_meta, MetaExtras, ResponseMeta, TIMESTAMP_KEY};
pub use mode::DeploymentMode;
pub use pagination::{PageParams, Pagination};
