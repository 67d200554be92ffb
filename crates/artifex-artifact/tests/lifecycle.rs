//! Artifact lifecycle under arbitrary sequences of operations

use artifex_artifact::{Artifact, ArtifactMeta, ArtifactStatus, ArtifactType, Fingerprint};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Content(String),
    Title(String),
    Transition(ArtifactStatus),
    Fail(String),
    Extend(usize),
}

fn arb_status() -> impl Strategy<Value = ArtifactStatus> {
    prop_oneof![
        Just(ArtifactStatus::Pending),
        Just(ArtifactStatus::Streaming),
        Just(ArtifactStatus::Complete),
        Just(ArtifactStatus::Error),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,8}".prop_map(Op::Content),
        "[A-Z][a-z]{0,6}".prop_map(Op::Title),
        arb_status().prop_map(Op::Transition),
        "[a-z]{1,8}".prop_map(Op::Fail),
        (0usize..500).prop_map(Op::Extend),
    ]
}

fn apply(artifact: &mut Artifact, op: Op) {
    match op {
        Op::Content(c) => {
            artifact.set_content(&c);
        }
        Op::Title(t) => {
            artifact.set_title(&t);
        }
        Op::Transition(s) => {
            let _ = artifact.transition(s);
        }
        Op::Fail(m) => {
            let _ = artifact.fail(m);
        }
        Op::Extend(end) => artifact.extend_to(end),
    }
}

proptest! {
    #[test]
    fn prop_terminal_is_sticky(ops in proptest::collection::vec(arb_op(), 0..32)) {
        let mut artifact = Artifact::opened(ArtifactType::Html, "Page", ArtifactMeta::new(), 40);
        let mut terminal: Option<ArtifactStatus> = None;
        for op in ops {
            apply(&mut artifact, op);
            match terminal {
                Some(status) => prop_assert_eq!(artifact.status(), status),
                None if artifact.status().is_terminal() => terminal = Some(artifact.status()),
                None => prop_assert_eq!(artifact.status(), ArtifactStatus::Streaming),
            }
        }
    }

    #[test]
    fn prop_updated_at_never_decreases(ops in proptest::collection::vec(arb_op(), 0..32)) {
        let mut artifact = Artifact::opened(ArtifactType::Code, "x", ArtifactMeta::new(), 0);
        let mut last = artifact.updated_at();
        for op in ops {
            apply(&mut artifact, op);
            prop_assert!(artifact.updated_at() >= last);
            last = artifact.updated_at();
        }
        prop_assert!(artifact.updated_at() >= artifact.created_at());
    }

    #[test]
    fn prop_span_never_inverts(ends in proptest::collection::vec(0usize..200, 0..16)) {
        let mut artifact = Artifact::opened(ArtifactType::Svg, "s", ArtifactMeta::new(), 100);
        for end in ends {
            artifact.extend_to(end);
            prop_assert!(artifact.position().end >= artifact.position().start);
            prop_assert_eq!(artifact.position().start, 100);
        }
    }
}

#[test]
fn error_message_is_recorded_once() {
    let mut artifact = Artifact::opened(ArtifactType::Mermaid, "Flow", ArtifactMeta::new(), 0);
    artifact.fail("render failed").unwrap();
    assert!(artifact.fail("again").is_err());
    assert_eq!(artifact.error(), Some("render failed"));
    assert_eq!(artifact.status(), ArtifactStatus::Error);
}

#[test]
fn json_shape() {
    let artifact = Artifact::opened(
        ArtifactType::Document,
        "Notes",
        ArtifactMeta::new().with("filename", "notes.md"),
        3,
    );
    let json = serde_json::to_value(&artifact).unwrap();
    assert_eq!(json["type"], "canvas:document");
    assert_eq!(json["status"], "streaming");
    assert_eq!(json["meta"]["filename"], "notes.md");
    assert_eq!(json["position"]["start"], 3);
    assert!(json.get("error").is_none());

    let back: Artifact = serde_json::from_value(json).unwrap();
    assert_eq!(back, artifact);
}

#[test]
fn fingerprint_ignores_identity_and_meta_order() {
    let a = Artifact::opened(
        ArtifactType::Code,
        "lib.rs",
        ArtifactMeta::new().with("language", "rust").with("filename", "lib.rs"),
        0,
    );
    let b = Artifact::opened(
        ArtifactType::Code,
        "lib.rs",
        ArtifactMeta::new().with("filename", "lib.rs").with("language", "rust"),
        99,
    );
    assert_ne!(a.id(), b.id());
    assert_eq!(a.fingerprint(), b.fingerprint());

    let parsed: Fingerprint = a.fingerprint().to_string().parse().unwrap();
    assert_eq!(parsed, a.fingerprint());
}
