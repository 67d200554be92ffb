//! Artifact lifecycle states and the transitions between them

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Lifecycle state of an artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    /// Known but no content received yet
    #[default]
    Pending,
    /// Fence open, content still arriving
    Streaming,
    /// Fence closed
    Complete,
    /// Aborted with an error
    Error,
}

impl ArtifactStatus {
    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Streaming => "streaming",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }

    /// `Complete` and `Error` admit no further transitions
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

impl Display for ArtifactStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses reachable from `from` in one step
///
/// Staying in the same status is not a transition and is always accepted by
/// [`validate_transition`].
#[must_use]
pub fn allowed_transitions(from: ArtifactStatus) -> &'static [ArtifactStatus] {
    use ArtifactStatus::{Complete, Error, Pending, Streaming};
    match from {
        Pending => &[Streaming, Complete, Error],
        Streaming => &[Complete, Error],
        Complete | Error => &[],
    }
}

/// Check a status change against the lifecycle
///
/// # Errors
/// Returns [`ArtifactError::IllegalTransition`] when leaving a terminal state
/// or moving backwards.
pub fn validate_transition(from: ArtifactStatus, to: ArtifactStatus) -> Result<(), ArtifactError> {
    if from == to || allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(ArtifactError::IllegalTransition { from, to })
    }
}
