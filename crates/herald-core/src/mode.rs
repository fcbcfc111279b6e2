//! Deployment mode.
//!
//! The deployment mode only controls disclosure policy for unknown failures.
//! Parsing is exact and case-sensitive: only the string `production` selects
//! [`DeploymentMode::Production`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Coarse runtime setting distinguishing production from everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DeploymentMode {
    /// Local development.
    #[default]
    Development,
    /// Test runs.
    Test,
    /// Production: unknown 500 failures are redacted.
    Production,
    /// Any other value (e.g. `staging`). Treated as non-production.
    Other(String),
}

impl DeploymentMode {
    /// Returns `true` only for [`DeploymentMode::Production`].
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
            Self::Other(value) => value,
        }
    }

    /// Parses a mode string. Never fails; unrecognized values become `Other`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "production" => Self::Production,
            "development" => Self::Development,
            "test" => Self::Test,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for DeploymentMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DeploymentMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeploymentMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_production_is_production() {
        assert!(DeploymentMode::parse("production").is_production());
        assert!(!DeploymentMode::parse("Production").is_production());
        assert!(!DeploymentMode::parse("PRODUCTION").is_production());
        assert!(!DeploymentMode::parse(" production").is_production());
        assert!(!DeploymentMode::parse("prod").is_production());
        assert!(!DeploymentMode::parse("").is_production());
    }

    #[test]
    fn test_known_modes() {
        assert_eq!(DeploymentMode::parse("development"), DeploymentMode::Development);
        assert_eq!(DeploymentMode::parse("test"), DeploymentMode::Test);
        assert_eq!(
            DeploymentMode::parse("staging"),
            DeploymentMode::Other("staging".to_string())
        );
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["production", "development", "test", "staging"] {
            let mode: DeploymentMode = raw.parse().unwrap();
            assert_eq!(mode.to_string(), raw);
        }
    }

    #[test]
    fn test_default_is_development() {
        assert_eq!(DeploymentMode::default(), DeploymentMode::Development);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&DeploymentMode::Production).unwrap();
        assert_eq!(json, "\"production\"");

        let mode: DeploymentMode = serde_json::from_str("\"qa\"").unwrap();
        assert_eq!(mode, DeploymentMode::Other("qa".to_string()));
    }
}
