//! Reference inputs and their expected parses

use artifex_artifact::{ArtifactStatus, ArtifactType};
use artifex_parser::{DiagnosticKind, StreamingParser};
use artifex_test_utils::{ATTRIBUTED_CODE, SPLIT_HTML_CHUNKS};
use pretty_assertions::assert_eq;

#[test]
fn attributed_code_block() {
    let result = StreamingParser::parse(ATTRIBUTED_CODE);

    assert_eq!(result.artifacts.len(), 1);
    let artifact = &result.artifacts[0];
    assert_eq!(artifact.artifact_type(), ArtifactType::Code);
    assert_eq!(artifact.language(), Some("ts"));
    assert_eq!(artifact.title(), "x");
    assert_eq!(artifact.content(), "let a=1;");
    assert_eq!(artifact.status(), ArtifactStatus::Complete);
    assert_eq!(artifact.position().start, 0);
    assert_eq!(artifact.position().end, ATTRIBUTED_CODE.len());
}

#[test]
fn split_opener_equals_whole_text() {
    let mut parser = StreamingParser::new();
    let first = parser.append(SPLIT_HTML_CHUNKS[0]);
    assert!(first.artifacts.is_empty());
    assert!(first.plain_text.is_empty());

    let second = parser.append(SPLIT_HTML_CHUNKS[1]);
    assert_eq!(second.artifacts.len(), 1);
    assert_eq!(second.artifacts[0].status(), ArtifactStatus::Streaming);
    assert_eq!(second.artifacts[0].content(), "<div");

    parser.append(SPLIT_HTML_CHUNKS[2]);
    let streamed = parser.finalize();
    let whole = StreamingParser::parse(&SPLIT_HTML_CHUNKS.concat());

    assert_eq!(streamed.artifacts.len(), whole.artifacts.len());
    let (a, b) = (&streamed.artifacts[0], &whole.artifacts[0]);
    assert!(a.content_eq(b));
    assert_eq!(a.status(), b.status());
    assert_eq!(a.position(), b.position());
    assert_eq!(a.artifact_type(), ArtifactType::Html);
}

#[test]
fn unknown_type_widget_becomes_code() {
    let mut parser = StreamingParser::new();
    parser.append("```artifact type=\"widget\" title=\"W\"\n<w/>\n```");
    let result = parser.finalize();

    assert_eq!(result.artifacts[0].artifact_type(), ArtifactType::Code);
    assert_eq!(result.artifacts[0].title(), "W");
    assert_eq!(result.artifacts[0].status(), ArtifactStatus::Complete);
    assert!(parser
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::InvalidType));
}

#[test]
fn unclosed_fence_at_finalize() {
    let mut parser = StreamingParser::new();
    parser.append("Working on it:\n```artifact type=\"react\" title=\"App\"\nexport default");
    let result = parser.finalize();

    assert_eq!(result.artifacts.len(), 1);
    assert_eq!(result.artifacts[0].status(), ArtifactStatus::Streaming);
    assert_eq!(result.artifacts[0].content(), "export default");
    assert_eq!(result.plain_text, "Working on it:");
    assert!(!result.is_complete);
    assert_eq!(
        parser.diagnostics().last().map(|d| d.kind),
        Some(DiagnosticKind::UnclosedFence)
    );
}

#[test]
fn parse_result_serializes_camel_case() {
    let result = StreamingParser::parse(ATTRIBUTED_CODE);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["isComplete"], true);
    assert_eq!(json["plainText"], "");
    assert_eq!(json["artifacts"][0]["type"], "code");
    assert_eq!(json["artifacts"][0]["status"], "complete");
    assert_eq!(json["artifacts"][0]["meta"]["language"], "ts");
}
