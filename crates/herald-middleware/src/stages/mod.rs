//! Middleware stages.
//!
//! Herald ships a single stage, [`error_normalization`], which sits last in a
//! host's chain and turns every failure into an error envelope.

pub mod error_normalization;

pub use error_normalization::{ErrorNormalizer, ModeSource, REQUEST_ID_META_KEY};
