//! Artifex command line
//!
//! ```text
//! artifex parse [FILE] [--chunk-size N] [--json]
//! artifex roundtrip [FILE]
//! artifex types
//! ```
//!
//! Global flags: `--config <path>` and `--log-level <level>`.

#![allow(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{build_cli, run};
pub use config::{CliConfig, LogFormat, LoggingConfig};
