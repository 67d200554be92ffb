//! Testing utilities for the Artifex workspace
//!
//! Shared fixtures, chunking helpers and proptest strategies.

#![allow(missing_docs)]

use artifex_artifact::{Artifact, ArtifactId, ArtifactMeta, ArtifactStatus, ArtifactType};
use proptest::prelude::*;

/// Attributed code fence closed without a trailing newline
pub const ATTRIBUTED_CODE: &str = "```artifact type=\"code\" language=\"ts\" title=\"x\"\nlet a=1;\n```";

/// Html fence split mid-marker and mid-tag
pub const SPLIT_HTML_CHUNKS: [&str; 3] = ["```art", "ifact type=\"html\"\n<div", ">\n```"];

/// A reply mixing prose, every fence form and an unclosed tail
pub const MIXED_REPLY: &str = "Sure! Here is the component:\n\
```tsx\n\
export const App = () => <h1>Hi</h1>;\n\
```\n\
And a diagram:\n\
```artifact type=\"mermaid\" title=\"Flow\"\n\
graph TD\n\
  A --> B\n\
```\n\
````\n\
Finally the doc:\n\
```artifact type=\"canvas:document\" filename=\"README.md\"\n\
# Title\n\
```bash\n\
cargo run\n\
Unfinished";

pub fn make_artifact(ty: ArtifactType, title: &str, content: &str) -> Artifact {
    Artifact::new(ArtifactId::new(), ty, title).with_content(content)
}

pub fn make_streaming_artifact(ty: ArtifactType, content: &str) -> Artifact {
    make_artifact(ty, ty.default_title(), content).with_status(ArtifactStatus::Streaming)
}

pub fn make_complete_artifact(ty: ArtifactType, content: &str) -> Artifact {
    make_artifact(ty, ty.default_title(), content).with_status(ArtifactStatus::Complete)
}

pub fn make_code_artifact(language: &str, content: &str) -> Artifact {
    make_artifact(ArtifactType::Code, language, content)
        .with_meta(ArtifactMeta::new().with("language", language))
        .with_status(ArtifactStatus::Complete)
}

/// Round `idx` down to the nearest char boundary of `text`
fn floor_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Split `text` at the given byte offsets (snapped to char boundaries)
pub fn chunk_at<'a>(text: &'a str, cuts: &[usize]) -> Vec<&'a str> {
    let mut points: Vec<usize> = cuts.iter().map(|&c| floor_boundary(text, c)).collect();
    points.sort_unstable();
    points.dedup();

    let mut chunks = Vec::with_capacity(points.len() + 1);
    let mut last = 0;
    for point in points {
        if point > last {
            chunks.push(&text[last..point]);
            last = point;
        }
    }
    if last < text.len() || chunks.is_empty() {
        chunks.push(&text[last..]);
    }
    chunks
}

/// Split `text` into pieces of at most `size` bytes without breaking chars
pub fn chunks_of(text: &str, size: usize) -> Vec<&str> {
    let size = size.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = floor_boundary(text, start + size);
        if end == start {
            end = text[start..]
                .char_indices()
                .nth(1)
                .map_or(text.len(), |(i, _)| start + i);
        }
        chunks.push(&text[start..end]);
        start = end;
    }
    chunks
}

/// One chunk per char
pub fn char_chunks(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(i, c)| &text[i..i + c.len_utf8()])
        .collect()
}

/// A prose line that never looks like a fence
pub fn arb_prose_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.!?é→]{0,24}"
}

/// True for a line that would close an open fence
pub fn is_close_line(line: &str) -> bool {
    line.trim_end() == "```"
}

/// A content line that never closes a fence, fence-like openers included
pub fn arb_content_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z0-9 (){};=<>/\"'`]{0,32}".prop_filter("not a close", |s| !is_close_line(s)),
        1 => Just(String::new()),
        1 => arb_language().prop_map(|lang| format!("```{lang}")),
        1 => arb_type_name().prop_map(|ty| format!("```artifact type=\"{ty}\"")),
        1 => Just("````".to_string()),
    ]
}

pub fn arb_type_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("code".to_string()),
        Just("html".to_string()),
        Just("svg".to_string()),
        Just("mermaid".to_string()),
        Just("react".to_string()),
        Just("canvas:document".to_string()),
        Just("canvas:novel".to_string()),
        Just("widget".to_string()),
    ]
}

pub fn arb_language() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("rust".to_string()),
        Just("ts".to_string()),
        Just("tsx".to_string()),
        Just("svg".to_string()),
        Just("mermaid".to_string()),
        Just("python".to_string()),
    ]
}

/// A fence opener in any of the accepted forms
pub fn arb_opener() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("```".to_string()),
        arb_language().prop_map(|lang| format!("```{lang}")),
        (arb_type_name(), proptest::option::of(arb_language()), "[a-zA-Z \"]{0,12}")
            .prop_map(|(ty, lang, title)| {
                let mut line = format!("```artifact type=\"{ty}\"");
                if let Some(lang) = lang {
                    line.push_str(&format!(" language=\"{lang}\""));
                }
                line.push_str(&format!(" title=\"{}\"", title.replace('"', "\\\"")));
                line
            }),
    ]
}

/// A block: opener, content lines, and usually a closer
pub fn arb_block() -> impl Strategy<Value = Vec<String>> {
    (
        arb_opener(),
        proptest::collection::vec(arb_content_line(), 0..6),
        prop_oneof![4 => Just(true), 1 => Just(false)],
    )
        .prop_map(|(opener, body, closed)| {
            let mut lines = vec![opener];
            lines.extend(body);
            if closed {
                lines.push("```".to_string());
            }
            lines
        })
}

/// A whole assistant reply: prose and blocks, optional CRLF, optional final newline
pub fn arb_document() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        2 => arb_prose_line().prop_map(|l| vec![l]),
        1 => arb_block(),
        1 => Just(vec!["````".to_string()]),
    ];
    (
        proptest::collection::vec(segment, 0..8),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(segments, crlf, trailing_newline)| {
            let sep = if crlf { "\r\n" } else { "\n" };
            let mut text = segments.concat().join(sep);
            if trailing_newline {
                text.push_str(sep);
            }
            text
        })
}

/// Document paired with arbitrary cut points inside it
pub fn arb_document_with_cuts() -> impl Strategy<Value = (String, Vec<usize>)> {
    arb_document().prop_flat_map(|doc| {
        let len = doc.len().max(1);
        (Just(doc), proptest::collection::vec(0..len, 0..12))
    })
}
