//! Registry behaviour seen from a host application

use artifex_artifact::{ArtifactMeta, ArtifactStatus, ArtifactType};
use artifex_registry::{global, RendererEntry, RendererHandle, TypeRegistry};
use artifex_test_utils::{make_artifact, make_code_artifact};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

struct SvgView;

fn arb_type() -> impl Strategy<Value = ArtifactType> {
    proptest::sample::select(ArtifactType::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_one_entry_per_type(
        regs in proptest::collection::vec((arb_type(), "[A-Za-z ]{1,12}"), 0..40)
    ) {
        let mut registry = TypeRegistry::new();
        for (ty, name) in &regs {
            registry.register(RendererEntry::new(*ty).with_display_name(name.clone()));
        }

        let mut distinct: Vec<_> = regs.iter().map(|(ty, _)| *ty).collect();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(registry.len(), distinct.len());
        prop_assert_eq!(registry.get_all().len(), distinct.len());

        for ty in distinct {
            let last = regs.iter().rev().find(|(t, _)| *t == ty).map(|(_, n)| n.as_str());
            prop_assert_eq!(registry.get(ty).map(|e| e.display_name.as_str()), last);
        }
    }
}

#[test]
fn registries_are_independent() {
    let mut a = TypeRegistry::new();
    let b = TypeRegistry::new();
    a.register(RendererEntry::new(ArtifactType::Html));
    assert!(a.has(ArtifactType::Html));
    assert!(!b.has(ArtifactType::Html));
}

#[test]
fn global_registry_is_seeded_and_shared() {
    {
        let registry = global().read();
        assert!(registry.has(ArtifactType::Novel));
    }
    {
        let mut registry = global().write();
        registry.register(
            RendererEntry::new(ArtifactType::Svg).with_renderer(RendererHandle::new(SvgView)),
        );
    }
    let registry = global().read();
    assert!(registry
        .get(ArtifactType::Svg)
        .is_some_and(|e| e.renderer.is::<SvgView>()));
    assert_eq!(registry.len(), ArtifactType::ALL.len());
}

#[test]
fn extensions_for_parsed_artifacts() {
    let registry = TypeRegistry::with_defaults();

    let ts = make_code_artifact("typescript", "let a = 1;");
    assert_eq!(registry.file_extension_for(&ts), "ts");

    let doc = make_artifact(ArtifactType::Document, "Notes", "# hi")
        .with_meta(ArtifactMeta::new().with("filename", "notes.markdown"));
    assert_eq!(registry.file_extension_for(&doc), "markdown");

    let poster = make_artifact(ArtifactType::Poster, "Launch", "<div/>")
        .with_status(ArtifactStatus::Complete);
    assert_eq!(registry.file_extension_for(&poster), "html");
}

#[test]
fn entries_serialize_without_renderer() {
    let registry = TypeRegistry::with_defaults();
    let json = serde_json::to_value(registry.get(ArtifactType::Mermaid).unwrap()).unwrap();
    assert_eq!(json["type"], "mermaid");
    assert_eq!(json["displayName"], "Diagram");
    assert_eq!(json["canEdit"], true);
    assert!(json.get("renderer").is_none());
}
