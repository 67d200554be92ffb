//! The artifact entity
//!
//! An [`Artifact`] is a typed, positioned block of content extracted from a
//! text stream. Fields are private so the lifecycle invariants hold:
//!
//! - `position.start` is fixed at creation and `position.end >= start`
//! - `updated_at >= created_at`, strictly increasing on every mutation
//! - status only moves forward (see [`crate::status`])

use crate::artifact_type::ArtifactType;
use crate::error::ArtifactError;
use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::meta::ArtifactMeta;
use crate::status::{validate_transition, ArtifactStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use ulid::Ulid;

/// Opaque, globally unique artifact identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(Ulid);

impl ArtifactId {
    /// Generate a fresh id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ArtifactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArtifactId {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| ArtifactError::InvalidId(format!("{s}: {e}")))
    }
}

/// Byte span in the original concatenated stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    /// Span starting and ending at `offset`
    #[inline]
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Span `[start, end)`; `end` is clamped to `start`
    #[inline]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// A typed block of content extracted from a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    id: ArtifactId,
    #[serde(rename = "type")]
    artifact_type: ArtifactType,
    title: String,
    content: String,
    status: ArtifactStatus,
    meta: ArtifactMeta,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Artifact {
    /// Create a `pending` artifact with empty content
    #[must_use]
    pub fn new(id: ArtifactId, artifact_type: ArtifactType, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            artifact_type,
            title: title.into(),
            content: String::new(),
            status: ArtifactStatus::Pending,
            meta: ArtifactMeta::new(),
            position: Position::default(),
            created_at: now,
            updated_at: now,
            error: None,
        }
    }

    /// Create the `streaming` artifact for a freshly opened fence
    #[must_use]
    pub fn opened(
        artifact_type: ArtifactType,
        title: impl Into<String>,
        meta: ArtifactMeta,
        start: usize,
    ) -> Self {
        let mut artifact = Self::new(ArtifactId::new(), artifact_type, title);
        artifact.status = ArtifactStatus::Streaming;
        artifact.meta = meta;
        artifact.position = Position::at(start);
        artifact
    }

    /// Builder: replace metadata
    #[must_use]
    pub fn with_meta(mut self, meta: ArtifactMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Builder: replace content
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Builder: set the initial status without transition checks
    #[must_use]
    pub fn with_status(mut self, status: ArtifactStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder: set the source span
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn artifact_type(&self) -> ArtifactType {
        self.artifact_type
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> ArtifactStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn meta(&self) -> &ArtifactMeta {
        &self.meta
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shortcut for `meta().language()`
    #[inline]
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.meta.language()
    }

    #[inline]
    #[must_use]
    pub fn is_canvas(&self) -> bool {
        self.artifact_type.is_canvas()
    }

    /// Advance `updated_at`, strictly past its previous value
    pub fn touch(&mut self) {
        let floor = self.updated_at + chrono::Duration::nanoseconds(1);
        self.updated_at = Utc::now().max(floor);
    }

    /// Replace content; touches only when it actually changed
    ///
    /// Returns whether the content changed.
    pub fn set_content(&mut self, content: &str) -> bool {
        if self.content == content {
            return false;
        }
        content.clone_into(&mut self.content);
        self.touch();
        true
    }

    /// Append to the content; touches unless `more` is empty
    pub fn push_content(&mut self, more: &str) {
        if more.is_empty() {
            return;
        }
        self.content.push_str(more);
        self.touch();
    }

    /// Replace the title; touches only when it changed
    pub fn set_title(&mut self, title: &str) -> bool {
        if self.title == title {
            return false;
        }
        title.clone_into(&mut self.title);
        self.touch();
        true
    }

    /// Replace metadata; touches only when it changed
    pub fn set_meta(&mut self, meta: ArtifactMeta) -> bool {
        if self.meta == meta {
            return false;
        }
        self.meta = meta;
        self.touch();
        true
    }

    /// Move to `to` if the lifecycle allows it
    ///
    /// # Errors
    /// Returns [`ArtifactError::IllegalTransition`] and leaves the artifact
    /// untouched when the move goes backwards or out of a terminal state.
    pub fn transition(&mut self, to: ArtifactStatus) -> Result<(), ArtifactError> {
        validate_transition(self.status, to)?;
        if self.status != to {
            self.status = to;
            self.touch();
        }
        Ok(())
    }

    /// Move to `error` with a message
    ///
    /// # Errors
    /// Fails when the artifact is already terminal.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), ArtifactError> {
        if self.status.is_terminal() {
            return Err(ArtifactError::IllegalTransition {
                from: self.status,
                to: ArtifactStatus::Error,
            });
        }
        self.transition(ArtifactStatus::Error)?;
        self.error = Some(message.into());
        Ok(())
    }

    /// Grow the span to `end`; never shrinks below `start`
    pub fn extend_to(&mut self, end: usize) {
        self.position.end = end.max(self.position.start);
    }

    /// Compare everything a parse determines: type, title, content, metadata
    #[must_use]
    pub fn content_eq(&self, other: &Self) -> bool {
        self.artifact_type == other.artifact_type
            && self.title == other.title
            && self.content == other.content
            && self.meta == other.meta
    }

    /// Digest of the fields compared by [`Artifact::content_eq`]
    ///
    /// Metadata is hashed in key order, matching the order-insensitive
    /// equality of [`ArtifactMeta`].
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut builder = FingerprintBuilder::new();
        builder
            .field(self.artifact_type.as_str().as_bytes())
            .field(self.title.as_bytes())
            .field(self.content.as_bytes());
        let mut entries: Vec<_> = self.meta.iter().collect();
        entries.sort_unstable();
        for (key, value) in entries {
            builder.field(key.as_bytes()).field(value.as_bytes());
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Artifact {
        Artifact::opened(
            ArtifactType::Code,
            "main.rs",
            ArtifactMeta::new().with("language", "rust"),
            10,
        )
    }

    #[test]
    fn opened_artifact_is_streaming_and_empty() {
        let a = sample();
        assert_eq!(a.status(), ArtifactStatus::Streaming);
        assert!(a.content().is_empty());
        assert_eq!(a.position(), Position::at(10));
        assert_eq!(a.created_at(), a.updated_at());
    }

    #[test]
    fn touch_strictly_increases() {
        let mut a = sample();
        let mut last = a.updated_at();
        for _ in 0..100 {
            a.touch();
            assert!(a.updated_at() > last);
            last = a.updated_at();
        }
        assert!(a.updated_at() >= a.created_at());
    }

    #[test]
    fn set_content_touches_only_on_change() {
        let mut a = sample();
        assert!(a.set_content("fn main() {}"));
        let stamp = a.updated_at();
        assert!(!a.set_content("fn main() {}"));
        assert_eq!(a.updated_at(), stamp);
    }

    #[test]
    fn transition_rejects_reopen() {
        let mut a = sample();
        a.transition(ArtifactStatus::Complete).unwrap();
        let stamp = a.updated_at();
        let err = a.transition(ArtifactStatus::Streaming).unwrap_err();
        assert!(matches!(err, ArtifactError::IllegalTransition { .. }));
        assert_eq!(a.status(), ArtifactStatus::Complete);
        assert_eq!(a.updated_at(), stamp);
    }

    #[test]
    fn fail_records_message() {
        let mut a = sample();
        a.fail("stream aborted").unwrap();
        assert_eq!(a.status(), ArtifactStatus::Error);
        assert_eq!(a.error(), Some("stream aborted"));
        assert!(a.fail("again").is_err());
    }

    #[test]
    fn push_content_appends() {
        let mut a = sample();
        a.push_content("fn ");
        let stamp = a.updated_at();
        a.push_content("");
        assert_eq!(a.updated_at(), stamp);
        a.push_content("main() {}");
        assert_eq!(a.content(), "fn main() {}");
        assert!(a.updated_at() > stamp);
    }

    #[test]
    fn extend_never_moves_start() {
        let mut a = sample();
        a.extend_to(42);
        assert_eq!(a.position(), Position::new(10, 42));
        a.extend_to(3);
        assert_eq!(a.position().start, 10);
        assert_eq!(a.position().end, 10);
    }

    #[test]
    fn content_eq_ignores_identity() {
        let a = sample().with_content("x");
        let b = sample().with_content("x");
        assert_ne!(a.id(), b.id());
        assert!(a.content_eq(&b));
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = sample().with_content("y");
        assert!(!a.content_eq(&c));
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn id_display_parse() {
        let id = ArtifactId::new();
        let parsed: ArtifactId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-ulid".parse::<ArtifactId>().is_err());
    }

    #[test]
    fn serde_shape() {
        let a = sample().with_content("body");
        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["type"], "code");
        assert_eq!(value["status"], "streaming");
        assert_eq!(value["meta"]["language"], "rust");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("error").is_none());

        let back: Artifact = serde_json::from_value(value).unwrap();
        assert_eq!(back, a);
    }
}
