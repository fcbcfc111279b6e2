//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use herald_core::DeploymentMode;
use serde::{Deserialize, Serialize};

/// Deployment environment section.
///
/// # Example
///
/// ```
/// use herald_config::EnvironmentConfig;
///
/// let config = EnvironmentConfig {
///     mode: "production".to_string(),
/// };
/// assert!(config.deployment_mode().is_production());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Deployment mode (`development`, `test`, `production`, or anything else).
    ///
    /// Only the exact string `production` enables redaction.
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

impl EnvironmentConfig {
    /// Parses [`Self::mode`].
    #[must_use]
    pub fn deployment_mode(&self) -> DeploymentMode {
        DeploymentMode::parse(&self.mode)
    }
}

fn default_mode() -> String {
    "development".to_string()
}

/// Where the error normalizer takes its deployment mode from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeSourceKind {
    /// Use `environment.mode`, fixed at load time.
    #[default]
    Config,
    /// Read `errors.mode_env_var` on every handled failure.
    Env,
}

/// Error normalization section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ErrorConfig {
    /// Mode source.
    #[serde(default)]
    pub mode_source: ModeSourceKind,

    /// Variable read when `mode_source` is `env`.
    #[serde(default = "default_mode_env_var")]
    pub mode_env_var: String,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            mode_source: ModeSourceKind::default(),
            mode_env_var: default_mode_env_var(),
        }
    }
}

fn default_mode_env_var() -> String {
    "APP_ENV".to_string()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

/// Levels accepted by [`LoggingConfig::level`].
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
