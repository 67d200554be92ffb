//! Error types for the artifact model

use crate::status::ArtifactStatus;

/// Errors raised by artifact model operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    /// Type name outside the closed set
    #[error("invalid artifact type: '{0}'")]
    InvalidType(String),

    /// Status change that the lifecycle forbids
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition {
        from: ArtifactStatus,
        to: ArtifactStatus,
    },

    /// Malformed artifact id
    #[error("invalid artifact id: {0}")]
    InvalidId(String),
}
