//! Error types for the parser crate
//!
//! Parsing itself is total and never returns an error. The only fallible
//! surface is loading a [`crate::ParserConfig`].

use std::path::PathBuf;

/// Errors while loading parser configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or unknown type names
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
