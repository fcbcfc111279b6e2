//! Typed configuration system for Herald.
//!
//! This crate provides a strongly-typed configuration for the Herald response
//! layer with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - `.env` files
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`HeraldConfig`] has three sections:
//!
//! - [`EnvironmentConfig`] - Deployment mode
//! - [`ErrorConfig`] - Where the error normalizer reads the mode from
//! - [`LoggingConfig`] - Log level and format
//!
//! # Example
//!
//! ```no_run
//! use herald_config::ConfigLoader;
//!
//! # fn main() -> Result<(), herald_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("herald.toml")?
//!     .with_env_prefix("HERALD")
//!     .load()?;
//!
//! let normalizer = config.error_normalizer();
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [environment]
//! mode = "production"
//!
//! [errors]
//! mode_source = "config"   # or "env"
//! mode_env_var = "APP_ENV"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `HERALD__ENVIRONMENT__MODE=production`
//! - `HERALD__ERRORS__MODE_SOURCE=env`
//! - `HERALD__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
