//! Store state and its derived views

use artifex_artifact::{Artifact, ArtifactId, ArtifactStatus};
use im::Vector;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the artifact list and selection
///
/// Clones are cheap: the list is a persistent vector sharing structure with
/// earlier states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub artifacts: Vector<Artifact>,
    pub selected_id: Option<ArtifactId>,
}

impl StoreState {
    /// Create new empty state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.artifacts.len()
    }

    #[inline]
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selected_id.is_some()
    }

    /// The selected artifact, if the selection points at one
    #[must_use]
    pub fn selected_artifact(&self) -> Option<&Artifact> {
        self.selected_id.and_then(|id| self.get(id))
    }

    /// True when the selected artifact is still streaming
    #[must_use]
    pub fn is_streaming_selected(&self) -> bool {
        self.selected_artifact()
            .is_some_and(|a| a.status() == ArtifactStatus::Streaming)
    }

    #[must_use]
    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id() == id)
    }

    /// Index of the artifact with `id`
    #[must_use]
    pub fn position_of(&self, id: ArtifactId) -> Option<usize> {
        self.artifacts.iter().position(|a| a.id() == id)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: ArtifactId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }
}
