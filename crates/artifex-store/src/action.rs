//! Store actions

use artifex_artifact::{Artifact, ArtifactId, ArtifactMeta, ArtifactStatus};

/// One indivisible change to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Insert, or replace the artifact with the same id in place
    Add(Artifact),
    /// Merge the present fields of `patch` into an existing artifact
    Update { id: ArtifactId, patch: ArtifactPatch },
    /// Delete by id
    Remove(ArtifactId),
    /// Change the selection; `None` clears it
    Select(Option<ArtifactId>),
    /// Drop every artifact and the selection
    Clear,
}

impl StoreAction {
    /// Short name for log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Update { .. } => "update",
            Self::Remove(_) => "remove",
            Self::Select(_) => "select",
            Self::Clear => "clear",
        }
    }
}

/// Partial artifact; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<ArtifactStatus>,
    pub meta: Option<ArtifactMeta>,
    /// Message recorded when `status` moves the artifact to `error`
    pub error: Option<String>,
}

impl ArtifactPatch {
    /// Create new empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ArtifactStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: ArtifactMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Move to `error` with a message
    #[must_use]
    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.status = Some(ArtifactStatus::Error);
        self.error = Some(message.into());
        self
    }

    /// True when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.status.is_none()
            && self.meta.is_none()
            && self.error.is_none()
    }
}
