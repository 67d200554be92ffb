//! CLI configuration file
//!
//! ```toml
//! [parser]
//! capture_generic_fences = true
//! track_nested_fences = false
//!
//! [parser.language_map]
//! vue = "html"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use anyhow::Context;
use artifex_parser::ParserConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log line format on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the artifex crates when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub parser: ParserConfig,
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// Fails on invalid TOML or unknown enum values.
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(input).context("invalid configuration")?;
        config.parser = config.parser.normalized();
        Ok(config)
    }

    /// Load from a file
    ///
    /// # Errors
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("loading config {}", path.display()))
    }

    /// Builder: override the log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifex_artifact::ArtifactType;

    #[test]
    fn defaults_when_empty() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn sections_parse() {
        let config = CliConfig::from_toml_str(
            "[parser]\ntrack_nested_fences = true\n[parser.language_map]\nVue = \"html\"\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();
        assert!(config.parser.track_nested_fences);
        assert_eq!(config.parser.type_for_language("vue"), ArtifactType::Html);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn bad_format_is_an_error() {
        assert!(CliConfig::from_toml_str("[logging]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifex.toml");
        std::fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(CliConfig::load(&path).unwrap().logging.level, "trace");
        assert!(CliConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
