//! Store properties over arbitrary action sequences

use artifex_artifact::{Artifact, ArtifactId, ArtifactStatus, ArtifactType};
use artifex_store::{reduce, ArtifactPatch, ArtifactStore, StoreAction, StoreState, StreamSession};
use artifex_test_utils::{chunks_of, make_streaming_artifact, MIXED_REPLY};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

/// A small pool so actions keep hitting the same ids
fn pool() -> Vec<Artifact> {
    (0..4)
        .map(|i| make_streaming_artifact(ArtifactType::ALL[i], &format!("body {i}")))
        .collect()
}

fn arb_action(pool: Vec<Artifact>) -> impl Strategy<Value = StoreAction> {
    let ids: Vec<ArtifactId> = pool.iter().map(Artifact::id).collect();
    let pick = proptest::sample::select(pool);
    let pick_id = proptest::sample::select(ids);
    prop_oneof![
        3 => pick.prop_map(StoreAction::Add),
        2 => (pick_id.clone(), "[a-z]{0,6}").prop_map(|(id, c)| StoreAction::Update {
            id,
            patch: ArtifactPatch::new().with_content(c),
        }),
        1 => pick_id.clone().prop_map(|id| StoreAction::Update {
            id,
            patch: ArtifactPatch::new().with_status(ArtifactStatus::Complete),
        }),
        1 => pick_id.clone().prop_map(StoreAction::Remove),
        2 => proptest::option::of(pick_id).prop_map(StoreAction::Select),
        1 => Just(StoreAction::Select(Some(ArtifactId::new()))),
        1 => Just(StoreAction::Clear),
    ]
}

fn arb_actions() -> impl Strategy<Value = Vec<StoreAction>> {
    proptest::collection::vec(arb_action(pool()), 0..48)
}

proptest! {
    #[test]
    fn prop_ids_stay_unique(actions in arb_actions()) {
        let mut state = StoreState::new();
        for action in actions {
            state = reduce(&state, action);
            let ids: HashSet<_> = state.iter().map(Artifact::id).collect();
            prop_assert_eq!(ids.len(), state.count());
        }
    }

    #[test]
    fn prop_selection_never_dangles(actions in arb_actions()) {
        let mut state = StoreState::new();
        for action in actions {
            state = reduce(&state, action);
            if let Some(id) = state.selected_id {
                prop_assert!(state.contains(id));
            }
        }
    }

    #[test]
    fn prop_remove_clears_only_its_own_selection(actions in arb_actions()) {
        let mut state = StoreState::new();
        for action in actions {
            let before = state.selected_id;
            let removed = match &action {
                StoreAction::Remove(id) => Some(*id),
                _ => None,
            };
            state = reduce(&state, action);
            if let Some(id) = removed {
                if before == Some(id) {
                    prop_assert_eq!(state.selected_id, None);
                } else {
                    prop_assert_eq!(state.selected_id, before);
                }
            }
        }
    }

    #[test]
    fn prop_finished_artifacts_stay_finished(actions in arb_actions()) {
        let mut state = StoreState::new();
        let mut finished = HashSet::new();
        for action in actions {
            if matches!(action, StoreAction::Clear) {
                finished.clear();
            }
            if let StoreAction::Remove(id) = &action {
                finished.remove(id);
            }
            state = reduce(&state, action);
            for artifact in state.iter() {
                if finished.contains(&artifact.id()) {
                    prop_assert!(artifact.status().is_terminal());
                }
                if artifact.status().is_terminal() {
                    finished.insert(artifact.id());
                }
            }
        }
    }
}

#[test]
fn removing_selected_leaves_no_selected_artifact() {
    let store = ArtifactStore::new();
    let artifact = make_streaming_artifact(ArtifactType::Html, "<div>");
    let id = artifact.id();

    store.dispatch(StoreAction::Add(artifact));
    store.dispatch(StoreAction::Select(Some(id)));
    assert!(store.snapshot().is_streaming_selected());

    store.dispatch(StoreAction::Remove(id));
    let state = store.snapshot();
    assert!(state.selected_artifact().is_none());
    assert_eq!(state.count(), 0);
}

#[test]
fn subscribers_see_whole_actions() {
    let store = ArtifactStore::new();
    let artifact = make_streaming_artifact(ArtifactType::Svg, "<svg/>");
    let id = artifact.id();
    store.dispatch(StoreAction::Add(artifact));
    store.dispatch(StoreAction::Select(Some(id)));

    let mut rx = store.subscribe();
    store.dispatch(StoreAction::Remove(id));
    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update();
    assert_eq!(seen.count(), 0);
    assert_eq!(seen.selected_id, None);
}

#[test]
fn session_matches_whole_parse() {
    let store = ArtifactStore::new();
    let mut session = StreamSession::new(store.clone());
    for chunk in chunks_of(MIXED_REPLY, 5) {
        session.push(chunk);
    }
    let (result, _) = session.finish();

    let state = store.snapshot();
    assert_eq!(state.count(), result.artifacts.len());
    for (stored, parsed) in state.iter().zip(&result.artifacts) {
        assert_eq!(stored, parsed);
    }
}

#[test]
fn state_serializes_camel_case() {
    let artifact = make_streaming_artifact(ArtifactType::Code, "x");
    let id = artifact.id();
    let state = reduce(
        &reduce(&StoreState::new(), StoreAction::Add(artifact)),
        StoreAction::Select(Some(id)),
    );
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["selectedId"], id.to_string());
    assert_eq!(json["artifacts"].as_array().map(Vec::len), Some(1));
}
