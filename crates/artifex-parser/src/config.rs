//! Parser configuration

use crate::error::ConfigError;
use artifex_artifact::ArtifactType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for [`crate::StreamingParser`]
///
/// Every field has a default, so an empty TOML table is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Capture plain ```` ```lang ```` fences as artifacts
    pub capture_generic_fences: bool,
    /// Keep fences nested inside an artifact as content
    ///
    /// Off by default: with it on, content holding an unbalanced opener line
    /// swallows the closing fence.
    pub track_nested_fences: bool,
    /// Extra language → type mappings, consulted before the built-in table
    pub language_map: IndexMap<String, ArtifactType>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            capture_generic_fences: true,
            track_nested_fences: false,
            language_map: IndexMap::new(),
        }
    }
}

impl ParserConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With generic fence capture on or off
    #[inline]
    #[must_use]
    pub fn with_generic_fences(mut self, capture: bool) -> Self {
        self.capture_generic_fences = capture;
        self
    }

    /// With nested fence tracking on or off
    #[inline]
    #[must_use]
    pub fn with_nested_fences(mut self, track: bool) -> Self {
        self.track_nested_fences = track;
        self
    }

    /// With an extra language mapping (keys match case-insensitively)
    #[must_use]
    pub fn with_language(mut self, language: &str, artifact_type: ArtifactType) -> Self {
        self.language_map
            .insert(language.to_ascii_lowercase(), artifact_type);
        self
    }

    /// Resolve a fence language tag to an artifact type
    ///
    /// Custom mappings win over the built-in table; anything unmapped is
    /// `code`.
    #[must_use]
    pub fn type_for_language(&self, language: &str) -> ArtifactType {
        let lowered = language.to_ascii_lowercase();
        self.language_map
            .get(&lowered)
            .copied()
            .or_else(|| ArtifactType::from_language(&lowered))
            .unwrap_or_default()
    }

    /// Parse from a TOML table
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] on malformed input or unknown type names.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        Ok(config.normalized())
    }

    /// Lowercase `language_map` keys, as deserialization keeps them verbatim
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.language_map = self
            .language_map
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        self
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&raw)
    }
}
