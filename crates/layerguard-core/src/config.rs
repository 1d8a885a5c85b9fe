//! Configuration types for layerguard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::report::ReportFormat;

/// Top-level configuration, usually loaded from `layerguard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Report defaults.
    #[serde(default)]
    pub output: OutputConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks that every `[rules.*]` entry names a known rule.
    ///
    /// # Errors
    ///
    /// Returns error describing the first unknown rule name.
    pub fn validate(&self, known_rules: &[&str]) -> Result<(), ConfigError> {
        for name in self.rules.keys() {
            if !known_rules.contains(&name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "rules.{name}: unknown rule (expected one of: {})",
                    known_rules.join(", ")
                )));
            }
        }
        if self.analyzer.root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "analyzer.root must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks if a rule is enabled. Rules are enabled unless configured off.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Source root, relative to the project directory.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Extra directory names to skip, on top of the built-in skip-list.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("src")
}

/// Report defaults; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Show info-severity entries in text output.
    #[serde(default)]
    pub detailed: bool,

    /// Report format.
    #[serde(default)]
    pub format: ReportFormat,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("Invalid config: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[&str] = &["layer-dependency", "type-quality"];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analyzer.root, PathBuf::from("src"));
        assert!(config.analyzer.exclude.is_empty());
        assert!(!config.output.detailed);
        assert_eq!(config.output.format, ReportFormat::Console);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "lib"
exclude = ["generated"]

[output]
detailed = true
format = "json"

[rules.type-quality]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("lib"));
        assert_eq!(config.analyzer.exclude, vec!["generated".to_string()]);
        assert!(config.output.detailed);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(!config.is_rule_enabled("type-quality"));
        assert!(config.is_rule_enabled("layer-dependency"));
        assert!(config.validate(RULES).is_ok());
    }

    #[test]
    fn empty_file_is_default() {
        let config = Config::parse("").expect("Failed to parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn validate_rejects_unknown_rule() {
        let config = Config::parse("[rules.no-such-rule]\nenabled = true\n").unwrap();
        let err = config.validate(RULES).unwrap_err();
        assert!(err.to_string().contains("no-such-rule"));
    }

    #[test]
    fn validate_rejects_empty_root() {
        let config = Config::parse("[analyzer]\nroot = \"\"\n").unwrap();
        assert!(config.validate(RULES).is_err());
    }

    #[test]
    fn parse_error_is_reported() {
        let err = Config::parse("[analyzer\nroot = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Config::from_file(&tmp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
