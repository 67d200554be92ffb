//! Pure reducer
//!
//! `reduce(state, action)` is the single place where store state changes.
//! It never mutates its input; rejected and no-op actions return a clone of
//! the input state.

use crate::action::{ArtifactPatch, StoreAction};
use crate::state::StoreState;
use artifex_artifact::{Artifact, ArtifactId, ArtifactStatus};

/// Apply one action, producing the next state
#[must_use]
pub fn reduce(state: &StoreState, action: StoreAction) -> StoreState {
    match action {
        StoreAction::Add(artifact) => add(state, artifact),
        StoreAction::Update { id, patch } => update(state, id, patch),
        StoreAction::Remove(id) => remove(state, id),
        StoreAction::Select(id) => select(state, id),
        StoreAction::Clear => StoreState::default(),
    }
}

fn add(state: &StoreState, artifact: Artifact) -> StoreState {
    let mut next = state.clone();
    match state.position_of(artifact.id()) {
        Some(index) => {
            let current = &state.artifacts[index];
            if current.status().is_terminal() && !artifact.status().is_terminal() {
                tracing::warn!(
                    artifact_id = %artifact.id(),
                    from = %current.status(),
                    to = %artifact.status(),
                    "rejected upsert reopening a finished artifact"
                );
                return next;
            }
            next.artifacts[index] = artifact;
        }
        None => next.artifacts.push_back(artifact),
    }
    next
}

fn update(state: &StoreState, id: ArtifactId, patch: ArtifactPatch) -> StoreState {
    let Some(index) = state.position_of(id) else {
        tracing::debug!(artifact_id = %id, "update for unknown artifact ignored");
        return state.clone();
    };

    let mut artifact = state.artifacts[index].clone();
    let ArtifactPatch {
        title,
        content,
        status,
        meta,
        error,
    } = patch;

    let outcome = match (status, error) {
        (Some(ArtifactStatus::Error), Some(message)) => artifact.fail(message),
        (Some(status), _) => artifact.transition(status),
        (None, _) => Ok(()),
    };
    if let Err(err) = outcome {
        tracing::warn!(artifact_id = %id, error = %err, "rejected update");
        return state.clone();
    }

    if let Some(title) = title {
        artifact.set_title(&title);
    }
    if let Some(content) = content {
        artifact.set_content(&content);
    }
    if let Some(meta) = meta {
        artifact.set_meta(meta);
    }
    artifact.touch();

    let mut next = state.clone();
    next.artifacts[index] = artifact;
    next
}

fn remove(state: &StoreState, id: ArtifactId) -> StoreState {
    let mut next = state.clone();
    if let Some(index) = state.position_of(id) {
        next.artifacts.remove(index);
        if next.selected_id == Some(id) {
            next.selected_id = None;
        }
    }
    next
}

fn select(state: &StoreState, id: Option<ArtifactId>) -> StoreState {
    let mut next = state.clone();
    match id {
        Some(id) if !state.contains(id) => {
            tracing::debug!(artifact_id = %id, "selection of unknown artifact ignored");
        }
        id => next.selected_id = id,
    }
    next
}
