//! Panel configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration.
//!
//! ```toml
//! placeholder = "Placeholder Text"
//!
//! [integer]
//! minimum = -9999
//! maximum = 9999
//!
//! [double]
//! minimum = -999.0
//! maximum = 999.0
//! decimals = 2
//!
//! [pattern]
//! regex = "^[A-Z]{3}-[0-9]{4}$"
//! intermediate = "^[A-Z]{0,3}(-[0-9]{0,4})?$"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widget::validator::{DoubleValidator, IntValidator, RegexValidator};

/// Most decimals a double validator may be configured with.
pub const MAX_DECIMALS: u32 = 15;

/// Errors raised while loading or checking a [`PanelConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or doesn't match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A numeric range is reversed or not finite.
    #[error("invalid [{section}] range: {minimum}..={maximum}")]
    InvalidRange {
        section: &'static str,
        minimum: String,
        maximum: String,
    },

    /// The double validator asks for more decimals than supported.
    #[error("[double] decimals must be at most {max}, got {0}", max = MAX_DECIMALS)]
    TooManyDecimals(u32),

    /// A regular expression failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The placeholder text is empty.
    #[error("placeholder must not be empty")]
    EmptyPlaceholder,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Bounds for the integer validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegerConfig {
    pub minimum: i64,
    pub maximum: i64,
}

impl Default for IntegerConfig {
    fn default() -> Self {
        Self {
            minimum: -9999,
            maximum: 9999,
        }
    }
}

/// Bounds and precision for the double validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoubleConfig {
    pub minimum: f64,
    pub maximum: f64,
    pub decimals: u32,
}

impl Default for DoubleConfig {
    fn default() -> Self {
        Self {
            minimum: -999.0,
            maximum: 999.0,
            decimals: 2,
        }
    }
}

/// Patterns for the regular-expression validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    /// Pattern for acceptable input.
    pub regex: String,
    /// Pattern for partial input. Without it, non-matching input is
    /// intermediate rather than invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            regex: "^[A-Z]{3}-[0-9]{4}$".to_string(),
            intermediate: Some("^[A-Z]{0,3}(-[0-9]{0,4})?$".to_string()),
        }
    }
}

/// Configuration of a [`LineEditsPanel`](crate::widget::widgets::LineEditsPanel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Placeholder text shown by every control while empty.
    pub placeholder: String,
    pub integer: IntegerConfig,
    pub double: DoubleConfig,
    pub pattern: PatternConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            placeholder: "Placeholder Text".to_string(),
            integer: IntegerConfig::default(),
            double: DoubleConfig::default(),
            pattern: PatternConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: "lineedits::config", path = %path.display(), "loaded panel config");
        Ok(config)
    }

    /// Render this configuration as a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check that ranges are ordered and finite and that patterns compile.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.placeholder.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }

        let IntegerConfig { minimum, maximum } = self.integer;
        if minimum > maximum {
            return Err(ConfigError::InvalidRange {
                section: "integer",
                minimum: minimum.to_string(),
                maximum: maximum.to_string(),
            });
        }

        let DoubleConfig {
            minimum,
            maximum,
            decimals,
        } = self.double;
        if !minimum.is_finite() || !maximum.is_finite() || minimum > maximum {
            return Err(ConfigError::InvalidRange {
                section: "double",
                minimum: minimum.to_string(),
                maximum: maximum.to_string(),
            });
        }
        if decimals > MAX_DECIMALS {
            return Err(ConfigError::TooManyDecimals(decimals));
        }

        self.pattern_validator().map(drop)
    }

    /// The integer validator this configuration describes.
    pub fn int_validator(&self) -> IntValidator {
        IntValidator::new(self.integer.minimum, self.integer.maximum)
    }

    /// The double validator this configuration describes.
    pub fn double_validator(&self) -> DoubleValidator {
        DoubleValidator::new(self.double.minimum, self.double.maximum, self.double.decimals)
    }

    /// Compile the pattern validator this configuration describes.
    pub fn pattern_validator(&self) -> ConfigResult<RegexValidator> {
        let regex = &self.pattern.regex;
        match &self.pattern.intermediate {
            Some(intermediate) => {
                regex::Regex::new(regex).map_err(|source| invalid_pattern(regex, source))?;
                RegexValidator::with_intermediate(regex, intermediate)
                    .map_err(|source| invalid_pattern(intermediate, source))
            }
            None => RegexValidator::new(regex).map_err(|source| invalid_pattern(regex, source)),
        }
    }
}

fn invalid_pattern(pattern: &str, source: regex::Error) -> ConfigError {
    ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::validator::{ValidationState, Validator};
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PanelConfig::from_toml_str("").unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.placeholder, "Placeholder Text");
    }

    #[test]
    fn test_partial_document() {
        let config = PanelConfig::from_toml_str(
            r#"
            placeholder = "Type here"

            [integer]
            maximum = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.placeholder, "Type here");
        assert_eq!(config.integer.minimum, -9999);
        assert_eq!(config.integer.maximum, 50);
        assert_eq!(config.double, DoubleConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = PanelConfig::from_toml_str("placeholdr = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_reversed_integer_range() {
        let err = PanelConfig::from_toml_str("[integer]\nminimum = 10\nmaximum = 1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                section: "integer",
                ..
            }
        ));
        assert_eq!(err.to_string(), "invalid [integer] range: 10..=1");
    }

    #[test]
    fn test_non_finite_double_range() {
        let err = PanelConfig::from_toml_str("[double]\nmaximum = inf").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { section: "double", .. }));
    }

    #[test]
    fn test_too_many_decimals() {
        let err = PanelConfig::from_toml_str("[double]\ndecimals = 16").unwrap_err();
        assert!(matches!(err, ConfigError::TooManyDecimals(16)));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PanelConfig::from_toml_str("[pattern]\nregex = \"([a-z\"").unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "([a-z"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_placeholder() {
        let err = PanelConfig::from_toml_str("placeholder = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPlaceholder));
    }

    #[test]
    fn test_validators_follow_config() {
        let config = PanelConfig::from_toml_str(
            "[integer]\nminimum = 0\nmaximum = 10\n[pattern]\nregex = \"^x+$\"",
        )
        .unwrap();

        assert_eq!(config.int_validator().validate("11"), ValidationState::Invalid);
        let pattern = config.pattern_validator().unwrap();
        assert_eq!(pattern.validate("xx"), ValidationState::Acceptable);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "placeholder = \"From file\"").unwrap();

        let config = PanelConfig::load(file.path()).unwrap();
        assert_eq!(config.placeholder, "From file");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = PanelConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PanelConfig::default();
        config.integer.maximum = 42;
        let text = config.to_toml_string().unwrap();
        assert_eq!(PanelConfig::from_toml_str(&text).unwrap(), config);
    }
}
