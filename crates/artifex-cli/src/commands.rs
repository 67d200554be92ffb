//! Subcommand implementations
//!
//! Each command works on in-memory text and writes to any [`Write`], so the
//! binary and the tests share one code path.

use artifex_artifact::{Artifact, ArtifactId, ArtifactType, Fingerprint};
use artifex_parser::{serialize_artifact, Diagnostic, ParserConfig, StreamingParser};
use artifex_registry::TypeRegistry;
use artifex_store::{ArtifactStore, StreamSession};
use serde::Serialize;
use std::io::{self, Write};

/// Output of `artifex parse`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub artifacts: Vec<Artifact>,
    pub plain_text: String,
    pub is_complete: bool,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of chunks the input was fed in
    pub chunks: usize,
}

/// Split `text` into chunks of at most `size` bytes on char boundaries
///
/// A char wider than `size` becomes its own chunk.
pub fn utf8_chunks(text: &str, size: usize) -> impl Iterator<Item = &str> {
    let size = size.max(1);
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let mut end = size.min(rest.len());
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

/// Stream `input` through a parser session into a fresh store
#[must_use]
pub fn parse_stream(input: &str, chunk_size: usize, config: ParserConfig) -> ParseReport {
    let store = ArtifactStore::new();
    let mut session = StreamSession::with_config(store.clone(), config);

    let mut chunks = 0;
    for chunk in utf8_chunks(input, chunk_size) {
        session.push(chunk);
        chunks += 1;
    }
    let (result, diagnostics) = session.finish();
    tracing::info!(
        chunks,
        artifacts = result.artifacts.len(),
        diagnostics = diagnostics.len(),
        "parsed input"
    );

    ParseReport {
        artifacts: store.snapshot().iter().cloned().collect(),
        plain_text: result.plain_text,
        is_complete: result.is_complete,
        diagnostics,
        chunks,
    }
}

/// Human readable rendering of a [`ParseReport`]
///
/// # Errors
/// Propagates write failures.
pub fn write_parse_text(report: &ParseReport, out: &mut impl Write) -> io::Result<()> {
    for (index, artifact) in report.artifacts.iter().enumerate() {
        let position = artifact.position();
        writeln!(
            out,
            "--- [{}] {} \"{}\" ({}, bytes {}..{})",
            index + 1,
            artifact.artifact_type(),
            artifact.title(),
            artifact.status(),
            position.start,
            position.end
        )?;
        for (key, value) in artifact.meta().iter() {
            writeln!(out, "    {key}: {value}")?;
        }
        writeln!(out, "{}", artifact.content())?;
    }
    if !report.plain_text.is_empty() {
        writeln!(out, "--- prose")?;
        writeln!(out, "{}", report.plain_text)?;
    }
    for diagnostic in &report.diagnostics {
        writeln!(out, "warning: {diagnostic}")?;
    }
    Ok(())
}

/// One artifact's fate in `artifex roundtrip`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTripEntry {
    pub id: ArtifactId,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    pub title: String,
    pub fingerprint: Fingerprint,
    pub survived: bool,
}

/// Output of `artifex roundtrip`
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundTripReport {
    pub entries: Vec<RoundTripEntry>,
}

impl RoundTripReport {
    /// True when every artifact came back content-equal
    #[must_use]
    pub fn all_survived(&self) -> bool {
        self.entries.iter().all(|e| e.survived)
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| !e.survived).count()
    }
}

/// Parse `input`, then serialize and reparse every artifact found
#[must_use]
pub fn round_trip(input: &str, config: &ParserConfig) -> RoundTripReport {
    let parsed = StreamingParser::parse_with(input, config.clone());
    let entries = parsed
        .artifacts
        .iter()
        .map(|artifact| {
            let again = StreamingParser::parse_with(&serialize_artifact(artifact), config.clone());
            let survived = matches!(again.artifacts.as_slice(), [only] if artifact.content_eq(only));
            if !survived {
                tracing::warn!(artifact_id = %artifact.id(), "artifact did not survive round trip");
            }
            RoundTripEntry {
                id: artifact.id(),
                artifact_type: artifact.artifact_type(),
                title: artifact.title().to_string(),
                fingerprint: artifact.fingerprint(),
                survived,
            }
        })
        .collect();
    RoundTripReport { entries }
}

/// # Errors
/// Propagates write failures.
pub fn write_round_trip(report: &RoundTripReport, out: &mut impl Write) -> io::Result<()> {
    for entry in &report.entries {
        let verdict = if entry.survived { "ok" } else { "MISMATCH" };
        writeln!(
            out,
            "{verdict:<8} {} {} \"{}\"",
            entry.fingerprint.short(),
            entry.artifact_type,
            entry.title
        )?;
    }
    writeln!(
        out,
        "{} artifact(s), {} mismatch(es)",
        report.entries.len(),
        report.failures()
    )
}

/// Table of registry entries for `artifex types`
///
/// # Errors
/// Propagates write failures.
pub fn write_types(registry: &TypeRegistry, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<18} {:<18} {:<10} {:<5} FAMILY", "TYPE", "NAME", "EXT", "EDIT")?;
    for (artifact_type, entry) in registry.iter() {
        let family = if artifact_type.is_canvas() {
            "canvas"
        } else {
            "lightweight"
        };
        writeln!(
            out,
            "{:<18} {:<18} {:<10} {:<5} {family}",
            artifact_type.as_str(),
            entry.display_name,
            entry.extension(),
            if entry.can_edit { "yes" } else { "no" },
        )?;
    }
    Ok(())
}
