//! Artifex Artifact Store
//!
//! Ordered list of artifacts plus a selection, changed only through a pure
//! reducer.
//!
//! # Core Concepts
//!
//! - [`StoreState`]: immutable value (persistent vector + selected id)
//! - [`StoreAction`]: add (upsert), update (patch), remove, select, clear
//! - [`reduce`]: `(&StoreState, StoreAction) -> StoreState`, no side effects
//! - [`ArtifactStore`]: `tokio::sync::watch` binding with atomic dispatch
//! - [`StreamSession`]: one parser per stream, publishing into a store
//!
//! # Example
//!
//! ```rust,ignore
//! use artifex_store::{ArtifactStore, StoreAction, StreamSession};
//!
//! let store = ArtifactStore::new();
//! let mut session = StreamSession::new(store.clone());
//! for chunk in response_chunks {
//!     session.push(chunk);
//! }
//! let (result, diagnostics) = session.finish();
//!
//! let first = store.snapshot().artifacts[0].id();
//! store.dispatch(StoreAction::Select(Some(first)));
//! ```

#![allow(missing_docs)]
#![warn(unreachable_pub)]

pub mod action;
pub mod reducer;
pub mod state;
pub mod store;

// Re-exports for convenience
pub use action::{ArtifactPatch, StoreAction};
pub use reducer::reduce;
pub use state::StoreState;
pub use store::{ArtifactStore, StreamSession};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the store
    pub use crate::action::{ArtifactPatch, StoreAction};
    pub use crate::reducer::reduce;
    pub use crate::state::StoreState;
    pub use crate::store::{ArtifactStore, StreamSession};
}
