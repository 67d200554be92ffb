//! Type registry
//!
//! Provides [`TypeRegistry`] mapping each [`ArtifactType`] to the
//! [`RendererEntry`] a host uses to present it.

use crate::renderer::RendererEntry;
use artifex_artifact::{extension_for_language, is_canvas_type, Artifact, ArtifactType};
use indexmap::IndexMap;

/// Display defaults for the built-in types: (type, name, icon, editable)
const BUILTIN: [(ArtifactType, &str, &str, bool); 10] = [
    (ArtifactType::Code, "Code", "code", true),
    (ArtifactType::Html, "HTML", "globe", true),
    (ArtifactType::Svg, "SVG Image", "image", true),
    (ArtifactType::Mermaid, "Diagram", "git-branch", true),
    (ArtifactType::React, "React Component", "atom", true),
    (ArtifactType::Document, "Document", "file-text", true),
    (ArtifactType::Poster, "Poster", "layout", false),
    (ArtifactType::Music, "Music", "music", false),
    (ArtifactType::Script, "Script", "clapperboard", true),
    (ArtifactType::Novel, "Novel", "book-open", true),
];

/// Insertion-ordered map of artifact type to renderer entry
///
/// Registration is an upsert: the last entry registered for a type wins and
/// keeps the type's original position in [`TypeRegistry::get_all`].
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    entries: IndexMap<ArtifactType, RendererEntry>,
}

impl TypeRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create registry with an entry for every built-in type
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (artifact_type, name, icon, can_edit) in BUILTIN {
            registry.register(
                RendererEntry::new(artifact_type)
                    .with_display_name(name)
                    .with_icon(icon)
                    .with_can_edit(can_edit),
            );
        }
        registry
    }

    /// Register an entry, returning the one it replaced
    pub fn register(&mut self, entry: RendererEntry) -> Option<RendererEntry> {
        let artifact_type = entry.artifact_type;
        let replaced = self.entries.insert(artifact_type, entry);
        if replaced.is_some() {
            tracing::debug!(artifact_type = %artifact_type, "renderer entry replaced");
        }
        replaced
    }

    /// Check if a type has an entry
    #[inline]
    #[must_use]
    pub fn has(&self, artifact_type: ArtifactType) -> bool {
        self.entries.contains_key(&artifact_type)
    }

    /// Entry registered for a type
    #[inline]
    #[must_use]
    pub fn get(&self, artifact_type: ArtifactType) -> Option<&RendererEntry> {
        self.entries.get(&artifact_type)
    }

    /// All entries, one per type, in registration order
    #[must_use]
    pub fn get_all(&self) -> Vec<&RendererEntry> {
        self.entries.values().collect()
    }

    /// Whether a type name belongs to the `canvas:` family
    ///
    /// Works on names so hosts can ask about types they have not registered.
    #[inline]
    #[must_use]
    pub fn is_canvas_type(&self, name: &str) -> bool {
        is_canvas_type(name)
    }

    /// Extension for saving an artifact of this type, never empty
    #[must_use]
    pub fn get_file_extension(&self, artifact_type: ArtifactType) -> &str {
        self.get(artifact_type)
            .map_or_else(|| artifact_type.default_extension(), RendererEntry::extension)
    }

    /// Best extension for one artifact
    ///
    /// Order: the extension of `meta.filename`, then the extension known for
    /// `meta.language`, then [`TypeRegistry::get_file_extension`].
    #[must_use]
    pub fn file_extension_for<'a>(&'a self, artifact: &'a Artifact) -> &'a str {
        let from_filename = artifact
            .meta()
            .filename()
            .and_then(|name| name.rsplit_once('.'))
            .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
            .map(|(_, ext)| ext);

        from_filename
            .or_else(|| artifact.language().and_then(extension_for_language))
            .unwrap_or_else(|| self.get_file_extension(artifact.artifact_type()))
    }

    /// Number of registered types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no type is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (type, entry) pairs
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactType, &RendererEntry)> {
        self.entries.iter().map(|(ty, entry)| (*ty, entry))
    }
}
