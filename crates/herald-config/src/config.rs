//! Main configuration types.
//!
//! This module provides the top-level [`HeraldConfig`] struct and its builder.

use herald_middleware::{ErrorNormalizer, ModeSource};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, EnvironmentConfig, ErrorConfig, LogFormat, LoggingConfig, ModeSourceKind};

/// Complete Herald configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use herald_config::HeraldConfig;
///
/// let config = HeraldConfig::default();
/// assert_eq!(config.environment.mode, "development");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HeraldConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Error normalization.
    #[serde(default)]
    pub errors: ErrorConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HeraldConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use herald_config::{EnvironmentConfig, HeraldConfig};
    ///
    /// let config = HeraldConfig::builder()
    ///     .environment(EnvironmentConfig {
    ///         mode: "production".to_string(),
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.environment.mode, "production");
    /// ```
    #[must_use]
    pub fn builder() -> HeraldConfigBuilder {
        HeraldConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `environment.mode` is empty
    /// - `errors.mode_source` is `env` and `errors.mode_env_var` is empty
    /// - `logging.level` is not a known level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.mode.is_empty() {
            return Err(ConfigError::invalid_value(
                "environment.mode",
                "must not be empty",
            ));
        }

        if self.errors.mode_source == ModeSourceKind::Env && self.errors.mode_env_var.is_empty() {
            return Err(ConfigError::invalid_value(
                "errors.mode_env_var",
                "must be set when errors.mode_source is 'env'",
            ));
        }

        let level = self.logging.level.to_lowercase();
        if !crate::LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("unknown log level: {}", self.logging.level),
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// - Pretty log formatting with ANSI colors
    /// - Debug log level
    /// - Unknown failures disclose their message and stack
    ///
    /// # Example
    ///
    /// ```
    /// use herald_config::HeraldConfig;
    ///
    /// let config = HeraldConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.environment.mode = "development".to_string();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// - JSON log formatting
    /// - Info log level
    /// - Unknown 500 failures are redacted
    ///
    /// # Example
    ///
    /// ```
    /// use herald_config::HeraldConfig;
    ///
    /// let config = HeraldConfig::production();
    /// assert_eq!(config.logging.format, herald_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.environment.mode = "production".to_string();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.ansi_enabled = false;

        config
    }

    /// Returns the normalizer's mode source for this configuration.
    #[must_use]
    pub fn mode_source(&self) -> ModeSource {
        match self.errors.mode_source {
            ModeSourceKind::Config => ModeSource::Fixed(self.environment.deployment_mode()),
            ModeSourceKind::Env => ModeSource::Env(self.errors.mode_env_var.clone()),
        }
    }

    /// Builds an [`ErrorNormalizer`] for this configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use herald_config::HeraldConfig;
    ///
    /// let normalizer = HeraldConfig::production().error_normalizer();
    /// assert!(normalizer.current_mode().is_production());
    /// ```
    #[must_use]
    pub fn error_normalizer(&self) -> ErrorNormalizer {
        ErrorNormalizer::with_mode_source(self.mode_source())
    }
}

/// Builder for [`HeraldConfig`].
#[derive(Debug, Default)]
pub struct HeraldConfigBuilder {
    environment: Option<EnvironmentConfig>,
    errors: Option<ErrorConfig>,
    logging: Option<LoggingConfig>,
}

impl HeraldConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment configuration.
    #[must_use]
    pub fn environment(mut self, environment: EnvironmentConfig) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set the error normalization configuration.
    #[must_use]
    pub fn errors(mut self, errors: ErrorConfig) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> HeraldConfig {
        HeraldConfig {
            environment: self.environment.unwrap_or_default(),
            errors: self.errors.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }
}
