//! Artifex Artifact Model
//!
//! Vocabulary shared by the parser, registry and store.
//!
//! # Core Concepts
//!
//! - [`ArtifactType`]: closed set of lightweight and `canvas:` types
//! - [`ArtifactStatus`]: `pending → streaming → complete | error`
//! - [`ArtifactMeta`]: open string map (`language`, `filename`, ...)
//! - [`Artifact`]: typed, positioned block of extracted content
//! - [`Fingerprint`]: identity-independent digest for equality checks
//!
//! # Example
//!
//! ```rust,ignore
//! use artifex_artifact::{Artifact, ArtifactMeta, ArtifactStatus, ArtifactType};
//!
//! let mut artifact = Artifact::opened(ArtifactType::Code, "main.rs", ArtifactMeta::new(), 0);
//! artifact.set_content("fn main() {}");
//! artifact.transition(ArtifactStatus::Complete)?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod artifact_type;
mod error;
mod fingerprint;
mod meta;
pub mod status;

pub use artifact::{Artifact, ArtifactId, Position};
pub use artifact_type::{
    extension_for_language, is_canvas_type, is_lightweight_type, ArtifactType, CANVAS_PREFIX,
    LIGHTWEIGHT_TYPES,
};
pub use error::ArtifactError;
pub use fingerprint::{Fingerprint, FingerprintBuilder, FingerprintError};
pub use meta::{keys, ArtifactMeta};
pub use status::{allowed_transitions, validate_transition, ArtifactStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
