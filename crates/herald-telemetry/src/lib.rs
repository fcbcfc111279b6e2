//! Logging setup for Herald.
//!
//! Herald's library crates only emit events through `tracing`; they never
//! install a subscriber. Services call [`init_logging`] once at startup to
//! route those events to stdout as JSON (production) or pretty text
//! (development).
//!
//! # Events emitted by the error normalizer
//!
//! | Level | When | Fields |
//! |-------|------|--------|
//! | `error` | Unknown failure | `request_id`, `http.status_code`, `error.code`, `mode` |
//! | `warn` | Operational failure, status >= 500 | `request_id`, `http.status_code`, `error.code` |
//! | `debug` | Operational failure, status < 500 | `request_id`, `http.status_code`, `error.code` |
//!
//! # Example
//!
//! ```no_run
//! use herald_config::HeraldConfig;
//! use herald_telemetry::{init_logging, LogConfig};
//!
//! # fn main() -> Result<(), herald_telemetry::TelemetryError> {
//! let config = HeraldConfig::production();
//! init_logging(&LogConfig::from(&config.logging))?;
//!
//! tracing::info!(service = "users", "Service started");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
