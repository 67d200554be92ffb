//! Artifact type vocabulary
//!
//! Two families share one closed tag set:
//! - *lightweight* types (`code`, `html`, `svg`, `mermaid`, `react`)
//! - *canvas* types, namespaced under `canvas:`
//!
//! Canvas membership is a prefix test on the wire name so it stays cheap in
//! hot paths.

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Namespace prefix shared by every canvas type
pub const CANVAS_PREFIX: &str = "canvas:";

/// Wire names of the lightweight family
pub const LIGHTWEIGHT_TYPES: [&str; 5] = ["code", "html", "svg", "mermaid", "react"];

/// Closed set of artifact types
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArtifactType {
    /// Source code in any language
    #[default]
    #[serde(rename = "code")]
    Code,
    /// Standalone HTML page
    #[serde(rename = "html")]
    Html,
    /// SVG image
    #[serde(rename = "svg")]
    Svg,
    /// Mermaid diagram
    #[serde(rename = "mermaid")]
    Mermaid,
    /// React component (JSX/TSX)
    #[serde(rename = "react")]
    React,
    /// Long-form document canvas
    #[serde(rename = "canvas:document")]
    Document,
    /// Poster canvas
    #[serde(rename = "canvas:poster")]
    Poster,
    /// Music canvas
    #[serde(rename = "canvas:music")]
    Music,
    /// Screenplay canvas
    #[serde(rename = "canvas:script")]
    Script,
    /// Novel canvas
    #[serde(rename = "canvas:novel")]
    Novel,
}

impl ArtifactType {
    /// Every type, lightweight family first
    pub const ALL: [ArtifactType; 10] = [
        Self::Code,
        Self::Html,
        Self::Svg,
        Self::Mermaid,
        Self::React,
        Self::Document,
        Self::Poster,
        Self::Music,
        Self::Script,
        Self::Novel,
    ];

    /// Wire name (`"code"`, `"canvas:poster"`, ...)
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Html => "html",
            Self::Svg => "svg",
            Self::Mermaid => "mermaid",
            Self::React => "react",
            Self::Document => "canvas:document",
            Self::Poster => "canvas:poster",
            Self::Music => "canvas:music",
            Self::Script => "canvas:script",
            Self::Novel => "canvas:novel",
        }
    }

    /// True for types in the `canvas:` namespace
    #[inline]
    #[must_use]
    pub fn is_canvas(self) -> bool {
        is_canvas_type(self.as_str())
    }

    /// True for the lightweight family
    #[inline]
    #[must_use]
    pub fn is_lightweight(self) -> bool {
        !self.is_canvas()
    }

    /// Generic title used when a fence carries neither filename nor language
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Html => "HTML",
            Self::Svg => "SVG Image",
            Self::Mermaid => "Diagram",
            Self::React => "React Component",
            Self::Document => "Document",
            Self::Poster => "Poster",
            Self::Music => "Music",
            Self::Script => "Script",
            Self::Novel => "Novel",
        }
    }

    /// Fallback file extension for export (never empty)
    #[must_use]
    pub const fn default_extension(self) -> &'static str {
        match self {
            Self::Code => "txt",
            Self::Html | Self::Poster => "html",
            Self::Svg => "svg",
            Self::Mermaid => "mmd",
            Self::React => "jsx",
            Self::Document | Self::Novel => "md",
            Self::Music => "abc",
            Self::Script => "fountain",
        }
    }

    /// Map a bare fence language tag to a special type
    ///
    /// Returns `None` for languages that stay plain `code`. Matching is
    /// case-insensitive.
    #[must_use]
    pub fn from_language(language: &str) -> Option<Self> {
        match language.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "mermaid" => Some(Self::Mermaid),
            "html" => Some(Self::Html),
            "jsx" | "tsx" => Some(Self::React),
            _ => None,
        }
    }
}

impl Display for ArtifactType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ArtifactError::InvalidType(s.to_string()))
    }
}

/// Prefix test on a raw type name
///
/// Any name in the `canvas:` namespace counts, including ones this crate
/// does not know about.
#[inline]
#[must_use]
pub fn is_canvas_type(name: &str) -> bool {
    name.starts_with(CANVAS_PREFIX)
}

/// Set membership test on a raw type name
#[inline]
#[must_use]
pub fn is_lightweight_type(name: &str) -> bool {
    LIGHTWEIGHT_TYPES.contains(&name)
}

/// File extension conventionally used for a language tag
///
/// Unknown tags yield `None`; callers fall back to the type's default.
#[must_use]
pub fn extension_for_language(language: &str) -> Option<&'static str> {
    let ext = match language.to_ascii_lowercase().as_str() {
        "rust" | "rs" => "rs",
        "typescript" | "ts" => "ts",
        "tsx" => "tsx",
        "javascript" | "js" => "js",
        "jsx" => "jsx",
        "python" | "py" => "py",
        "go" | "golang" => "go",
        "java" => "java",
        "c" => "c",
        "cpp" | "c++" => "cpp",
        "csharp" | "c#" | "cs" => "cs",
        "ruby" | "rb" => "rb",
        "shell" | "bash" | "sh" | "zsh" => "sh",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "sql" => "sql",
        "markdown" | "md" => "md",
        "html" => "html",
        "css" => "css",
        "svg" => "svg",
        "mermaid" => "mmd",
        _ => return None,
    };
    Some(ext)
}
