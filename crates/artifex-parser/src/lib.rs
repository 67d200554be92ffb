//! Artifex Streaming Parser
//!
//! Extracts typed artifacts from an assistant's text stream while it is
//! still arriving.
//!
//! # Core Operations
//!
//! - **Append**: feed the next chunk, get the cumulative [`ParseResult`]
//! - **Finalize**: resolve the trailing partial line at end of stream
//! - **Serialize**: render an artifact back to fence text
//!
//! # Architecture
//!
//! ```text
//! chunks → StreamingParser ─┬─ artifacts (attributed / generic fences)
//!            │ per line     └─ plain text (everything else)
//!            └─ fence::classify
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use artifex_parser::StreamingParser;
//!
//! let mut parser = StreamingParser::new();
//! for chunk in ["```art", "ifact type=\"html\"\n<div", ">\n```"] {
//!     let live = parser.append(chunk);
//!     render(&live.artifacts);
//! }
//! let done = parser.finalize();
//! assert_eq!(done.artifacts[0].content(), "<div>");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fence;
pub mod serialize;
pub mod streaming;

// Re-exports for convenience
pub use config::ParserConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::ConfigError;
pub use serialize::{serialize_artifact, serialize_artifacts};
pub use streaming::{ParseResult, StreamingParser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the parser
    pub use crate::config::ParserConfig;
    pub use crate::serialize::serialize_artifact;
    pub use crate::streaming::{ParseResult, StreamingParser};
    pub use artifex_artifact::{Artifact, ArtifactStatus, ArtifactType};
}
