//! Artifact → fence text
//!
//! The inverse of the attributed opener grammar, used to persist chat
//! messages that contain artifacts and rebuild them later with
//! [`crate::StreamingParser::parse`].

use crate::fence::{self, ARTIFACT_MARKER, FENCE};
use artifex_artifact::{keys, Artifact};
use std::fmt::Write as _;

/// Attribute names the opener grammar consumes itself
const RESERVED_KEYS: [&str; 4] = ["type", "title", keys::LANGUAGE, keys::FILENAME];

/// Render one artifact as an attributed fence block
///
/// Layout: `type`, `language`, `title`, `filename`, then remaining metadata
/// in insertion order. Metadata keys that cannot be written as attribute
/// names are dropped.
#[must_use]
pub fn serialize_artifact(artifact: &Artifact) -> String {
    let meta = artifact.meta();
    let mut out = String::with_capacity(artifact.content().len() + 64);
    out.push_str(FENCE);
    out.push_str(ARTIFACT_MARKER);

    push_attr(&mut out, "type", artifact.artifact_type().as_str());
    if let Some(language) = meta.language() {
        push_attr(&mut out, keys::LANGUAGE, language);
    }
    if !artifact.title().is_empty() {
        push_attr(&mut out, "title", artifact.title());
    }
    if let Some(filename) = meta.filename() {
        push_attr(&mut out, keys::FILENAME, filename);
    }
    for (key, value) in meta.iter() {
        if RESERVED_KEYS.contains(&key) {
            continue;
        }
        if !fence::is_valid_key(key) {
            tracing::debug!(key, "dropping metadata key that is not a valid attribute name");
            continue;
        }
        push_attr(&mut out, key, value);
    }

    out.push('\n');
    out.push_str(artifact.content());
    out.push('\n');
    out.push_str(FENCE);
    out
}

/// Render several artifacts, separated by blank lines
#[must_use]
pub fn serialize_artifacts<'a>(artifacts: impl IntoIterator<Item = &'a Artifact>) -> String {
    artifacts
        .into_iter()
        .map(serialize_artifact)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    // Writing into a String cannot fail.
    let _ = write!(out, " {key}=\"{}\"", fence::escape(value));
}
