//! Renderer entries and the opaque handle they carry

use artifex_artifact::ArtifactType;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased renderer owned by the host application
///
/// The registry never looks inside; hosts store whatever they render with
/// and recover it through [`RendererHandle::downcast_ref`].
#[derive(Clone)]
pub struct RendererHandle(Arc<dyn Any + Send + Sync>);

impl RendererHandle {
    /// Wrap a renderer value
    pub fn new<R: Any + Send + Sync>(renderer: R) -> Self {
        Self(Arc::new(renderer))
    }

    /// Placeholder for entries without a real renderer
    #[must_use]
    pub fn none() -> Self {
        Self::new(())
    }

    /// Borrow the renderer as `R`, if that is what it is
    #[must_use]
    pub fn downcast_ref<R: Any>(&self) -> Option<&R> {
        self.0.downcast_ref::<R>()
    }

    /// True when the renderer is an `R`
    #[inline]
    #[must_use]
    pub fn is<R: Any>(&self) -> bool {
        self.0.is::<R>()
    }

    /// True when both handles point at the same renderer
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for RendererHandle {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for RendererHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is::<()>() {
            f.write_str("RendererHandle(none)")
        } else {
            f.write_str("RendererHandle(..)")
        }
    }
}

/// Everything a host needs to present one artifact type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererEntry {
    /// Type this entry presents
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    /// Human readable type name
    pub display_name: String,
    /// Icon name in the host's icon set
    pub icon: String,
    /// Whether the host offers an editor for this type
    pub can_edit: bool,
    /// Overrides the type's default extension when set
    pub file_extension: Option<String>,
    /// Host renderer, never serialized
    #[serde(skip)]
    pub renderer: RendererHandle,
}

impl RendererEntry {
    /// Create new entry with the type's default title as display name
    #[must_use]
    pub fn new(artifact_type: ArtifactType) -> Self {
        Self {
            artifact_type,
            display_name: artifact_type.default_title().to_string(),
            icon: String::new(),
            can_edit: false,
            file_extension: None,
            renderer: RendererHandle::none(),
        }
    }

    /// Builder: set display name
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Builder: set icon
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Builder: set edit capability
    #[must_use]
    pub fn with_can_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = can_edit;
        self
    }

    /// Set an explicit extension; a leading dot is stripped, empty means none
    #[must_use]
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let extension = extension.trim_start_matches('.');
        self.file_extension = (!extension.is_empty()).then(|| extension.to_string());
        self
    }

    /// Builder: attach the host renderer
    #[must_use]
    pub fn with_renderer(mut self, renderer: RendererHandle) -> Self {
        self.renderer = renderer;
        self
    }

    /// Explicit extension, else the type's default
    #[must_use]
    pub fn extension(&self) -> &str {
        self.file_extension
            .as_deref()
            .unwrap_or_else(|| self.artifact_type.default_extension())
    }
}
