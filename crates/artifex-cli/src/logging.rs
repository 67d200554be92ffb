//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout stays machine readable. `RUST_LOG` wins over
//! the configured level.

use crate::config::LogFormat;
use anyhow::Context;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: `level` for artifex, warn elsewhere
///
/// # Errors
/// Fails when `level` is not a tracing level name.
pub fn default_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level '{level}'"))?;
    let level = level.to_string().to_ascii_lowercase();
    Ok(EnvFilter::new(format!("warn,artifex={level}")))
}

/// Install the global subscriber
///
/// # Errors
/// Fails on an invalid level or when a subscriber is already installed.
pub fn init(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow::anyhow!("installing tracing subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_build_filters() {
        for level in ["trace", "debug", "info", "warn", "error", "off", "DEBUG"] {
            assert!(default_filter(level).is_ok(), "{level}");
        }
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(default_filter("loud").is_err());
    }
}
