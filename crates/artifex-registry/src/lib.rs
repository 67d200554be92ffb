//! Artifex Type Registry
//!
//! Maps artifact types to the renderer entries a host application uses to
//! present them.
//!
//! # Core Concepts
//!
//! - [`TypeRegistry`]: constructible, injectable type → entry map
//! - [`RendererEntry`]: display name, icon, edit capability, file extension
//! - [`RendererHandle`]: opaque handle to the host's renderer
//! - [`global`]: lazily created process-wide default, seeded with all types
//!
//! # Example
//!
//! ```rust,ignore
//! use artifex_registry::{RendererEntry, RendererHandle, TypeRegistry};
//! use artifex_artifact::ArtifactType;
//!
//! let mut registry = TypeRegistry::with_defaults();
//! registry.register(
//!     RendererEntry::new(ArtifactType::Svg).with_renderer(RendererHandle::new(MySvgView)),
//! );
//! assert_eq!(registry.get_file_extension(ArtifactType::Svg), "svg");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod registry;
pub mod renderer;

// Re-exports for convenience
pub use registry::TypeRegistry;
pub use renderer::{RendererEntry, RendererHandle};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static GLOBAL: Lazy<RwLock<TypeRegistry>> = Lazy::new(|| {
    tracing::debug!("initializing default type registry");
    RwLock::new(TypeRegistry::with_defaults())
});

/// Process-wide default registry, created with all built-in types on first use
///
/// Prefer passing a [`TypeRegistry`] explicitly; this exists for hosts that
/// want a single shared instance.
#[must_use]
pub fn global() -> &'static RwLock<TypeRegistry> {
    &GLOBAL
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the registry
    pub use crate::registry::TypeRegistry;
    pub use crate::renderer::{RendererEntry, RendererHandle};
    pub use artifex_artifact::ArtifactType;
}
