//! Incremental artifact parser
//!
//! [`StreamingParser`] consumes a text stream in arbitrary chunks and keeps a
//! cumulative [`ParseResult`]. Processing is line oriented: complete lines are
//! classified with [`crate::fence::classify`] and the trailing partial line
//! waits in a buffer. Because every decision is made on whole lines, the
//! output after [`StreamingParser::finalize`] does not depend on how the
//! input was chunked.

use crate::config::ParserConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::fence::{self, FenceAttributes, FenceLine};
use artifex_artifact::{keys, Artifact, ArtifactMeta, ArtifactStatus, ArtifactType};
use serde::{Deserialize, Serialize};

/// Snapshot of everything parsed so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Every artifact seen in this session, in source order
    pub artifacts: Vec<Artifact>,
    /// Prose outside fences, lines joined by `\n`
    pub plain_text: String,
    /// False while a fence is open
    pub is_complete: bool,
}

impl ParseResult {
    /// Artifacts whose fence has closed
    pub fn completed(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .iter()
            .filter(|a| a.status() == ArtifactStatus::Complete)
    }

    /// The artifact still receiving content, if any
    #[must_use]
    pub fn streaming(&self) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .rev()
            .find(|a| a.status() == ArtifactStatus::Streaming)
    }
}

/// The fence currently being filled
#[derive(Debug)]
struct OpenFence {
    /// Index into `StreamingParser::artifacts`
    index: usize,
    /// Completed content lines joined by `\n`
    content: String,
    line_count: usize,
    /// Nested language-tagged fences awaiting their close
    depth: usize,
}

impl OpenFence {
    fn push_line(&mut self, line: &str) {
        if self.line_count > 0 {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.line_count += 1;
    }
}

/// Stateful, chunk-order-sensitive artifact extractor
///
/// One instance per stream. Calls must follow stream order; the parser does
/// no I/O and never fails.
#[derive(Debug, Default)]
pub struct StreamingParser {
    config: ParserConfig,
    /// Unprocessed tail of the stream (no `\n` inside)
    buffer: String,
    /// Stream offset of `buffer[0]`
    buffer_offset: usize,
    artifacts: Vec<Artifact>,
    open: Option<OpenFence>,
    plain_text: String,
    prose_lines: usize,
    line_number: usize,
    /// Whether lines end in `\r\n`, fixed by the first complete line
    crlf: Option<bool>,
    diagnostics: Vec<Diagnostic>,
    finalized: bool,
}

impl StreamingParser {
    /// Create parser with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parser with explicit configuration
    #[inline]
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Parse a complete text in one go
    #[must_use]
    pub fn parse(text: &str) -> ParseResult {
        Self::parse_with(text, ParserConfig::default())
    }

    /// Parse a complete text with explicit configuration
    #[must_use]
    pub fn parse_with(text: &str, config: ParserConfig) -> ParseResult {
        let mut parser = Self::with_config(config);
        parser.append(text);
        parser.finalize()
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Feed the next slice of the stream
    pub fn append(&mut self, chunk: &str) -> ParseResult {
        self.finalized = false;
        let search_from = self.buffer.len();
        self.buffer.push_str(chunk);

        let buffer = std::mem::take(&mut self.buffer);
        let mut consumed = 0;
        let mut search = search_from;
        while let Some(rel) = buffer[search..].find('\n') {
            let newline = search + rel;
            let start = self.buffer_offset + consumed;
            let end = self.buffer_offset + newline + 1;
            if self.crlf.is_none() {
                self.crlf = Some(buffer[consumed..newline].ends_with('\r'));
            }
            self.process_line(&buffer[consumed..newline], start, end);
            consumed = newline + 1;
            search = consumed;
        }
        self.buffer_offset += consumed;
        self.buffer = buffer[consumed..].to_string();

        self.result()
    }

    /// Signal end of stream and resolve the trailing partial line
    ///
    /// A fence still open afterwards stays `streaming`; that is a valid
    /// outcome, reported only as an `UNCLOSED_FENCE` diagnostic.
    pub fn finalize(&mut self) -> ParseResult {
        if self.finalized {
            return self.result();
        }

        if !self.buffer.is_empty() {
            let tail = std::mem::take(&mut self.buffer);
            let start = self.buffer_offset;
            let end = start + tail.len();
            self.process_line(&tail, start, end);
            self.buffer_offset = end;
        }

        if let Some(open) = &self.open {
            let artifact = &self.artifacts[open.index];
            let position = artifact.position();
            tracing::warn!(
                artifact_id = %artifact.id(),
                artifact_type = %artifact.artifact_type(),
                start = position.start,
                "stream ended inside an open fence"
            );
            let message = format!("fence opened at byte {} was never closed", position.start);
            self.record(DiagnosticKind::UnclosedFence, position.start, message);
        }

        self.finalized = true;
        self.result()
    }

    /// Drop all state, keeping the configuration
    pub fn reset(&mut self) {
        let config = std::mem::take(&mut self.config);
        *self = Self::with_config(config);
    }

    /// Current snapshot, re-synced with the open fence's partial content
    pub fn result(&mut self) -> ParseResult {
        self.sync_open();
        ParseResult {
            artifacts: self.artifacts.clone(),
            plain_text: self.plain_text_view(),
            is_complete: self.open.is_none(),
        }
    }

    /// True while a fence is open
    #[inline]
    #[must_use]
    pub fn has_open_fence(&self) -> bool {
        self.open.is_some()
    }

    /// The artifact currently streaming, as of the last result
    #[must_use]
    pub fn open_artifact(&self) -> Option<&Artifact> {
        self.open.as_ref().map(|open| &self.artifacts[open.index])
    }

    /// Bytes received so far
    #[inline]
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.buffer_offset + self.buffer.len()
    }

    /// Diagnostics recorded this session
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn process_line(&mut self, raw: &str, start: usize, end: usize) {
        let line = match self.crlf {
            Some(true) => raw.strip_suffix('\r').unwrap_or(raw),
            _ => raw,
        };
        self.line_number += 1;

        if self.open.is_some() {
            self.process_fenced_line(line, end);
        } else {
            self.process_prose_line(line, start, end);
        }
    }

    fn process_fenced_line(&mut self, line: &str, end: usize) {
        let track_nested = self.config.track_nested_fences;
        let Some(open) = self.open.as_mut() else {
            return;
        };

        match fence::classify(line) {
            FenceLine::Bare if open.depth == 0 => {
                self.close(end);
                return;
            }
            FenceLine::Bare => open.depth -= 1,
            opener if track_nested && opener.is_opener() => open.depth += 1,
            _ => {}
        }

        open.push_line(line);
        let index = open.index;
        self.artifacts[index].extend_to(end);
    }

    fn process_prose_line(&mut self, line: &str, start: usize, end: usize) {
        match fence::classify(line) {
            FenceLine::Attributed(attrs) => self.open_attributed(&attrs, start, end),
            FenceLine::Bare if self.config.capture_generic_fences => {
                self.open_generic(None, start, end);
            }
            FenceLine::Generic { language } if self.config.capture_generic_fences => {
                self.open_generic(Some(language), start, end);
            }
            FenceLine::Malformed { reason } => {
                self.record(DiagnosticKind::MalformedFence, start, reason);
                self.push_prose(line);
            }
            _ => self.push_prose(line),
        }
    }

    fn open_attributed(&mut self, attrs: &FenceAttributes, start: usize, end: usize) {
        if !attrs.residue.is_empty() {
            let message = format!("ignored attribute text '{}'", attrs.residue);
            self.record(DiagnosticKind::MalformedFence, start, message);
        }

        let mut meta = ArtifactMeta::new();
        let mut title = None;
        for (key, value) in &attrs.pairs {
            match key.as_str() {
                "type" => {}
                "title" => title = Some(value.clone()).filter(|t| !t.is_empty()),
                _ => {
                    meta.insert(key.clone(), value.clone());
                }
            }
        }

        let artifact_type = match attrs.get("type") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                let message = format!("unknown type '{raw}', falling back to code");
                self.record(DiagnosticKind::InvalidType, start, message);
                ArtifactType::Code
            }),
            None => meta
                .language()
                .map_or(ArtifactType::Code, |lang| self.config.type_for_language(lang)),
        };

        self.open(artifact_type, title, meta, start, end);
    }

    fn open_generic(&mut self, language: Option<String>, start: usize, end: usize) {
        let mut meta = ArtifactMeta::new();
        let artifact_type = match language {
            Some(language) => {
                let artifact_type = self.config.type_for_language(&language);
                meta.insert(keys::LANGUAGE, language);
                artifact_type
            }
            None => ArtifactType::Code,
        };
        self.open(artifact_type, None, meta, start, end);
    }

    fn open(
        &mut self,
        artifact_type: ArtifactType,
        title: Option<String>,
        meta: ArtifactMeta,
        start: usize,
        end: usize,
    ) {
        let title = title.unwrap_or_else(|| default_title(artifact_type, &meta));
        let mut artifact = Artifact::opened(artifact_type, title, meta, start);
        artifact.extend_to(end);

        tracing::debug!(
            artifact_id = %artifact.id(),
            artifact_type = %artifact_type,
            start,
            "fence opened"
        );

        self.open = Some(OpenFence {
            index: self.artifacts.len(),
            content: String::new(),
            line_count: 0,
            depth: 0,
        });
        self.artifacts.push(artifact);
    }

    fn close(&mut self, end: usize) {
        let Some(open) = self.open.take() else {
            return;
        };
        let artifact = &mut self.artifacts[open.index];
        artifact.set_content(&open.content);
        artifact.extend_to(end);
        if let Err(err) = artifact.transition(ArtifactStatus::Complete) {
            // Opened artifacts are always streaming; nothing else can own them.
            tracing::warn!(artifact_id = %artifact.id(), error = %err, "could not complete artifact");
        }

        tracing::debug!(
            artifact_id = %artifact.id(),
            artifact_type = %artifact.artifact_type(),
            bytes = artifact.content().len(),
            "fence closed"
        );
    }

    fn push_prose(&mut self, line: &str) {
        if self.prose_lines > 0 {
            self.plain_text.push('\n');
        }
        self.plain_text.push_str(line);
        self.prose_lines += 1;
    }

    /// Mirror the open fence's lines, plus a preview of the partial line,
    /// into its artifact
    fn sync_open(&mut self) {
        let Some(open) = &self.open else {
            return;
        };
        // Same as `partial_line`, borrowing only the buffer fields so the
        // artifact can be borrowed mutably alongside it
        let partial: &str = match self.crlf {
            Some(false) => &self.buffer,
            _ => self.buffer.strip_suffix('\r').unwrap_or(&self.buffer),
        };
        let artifact = &mut self.artifacts[open.index];

        if partial.is_empty() || fence::could_become_bare(partial) {
            artifact.set_content(&open.content);
            artifact.extend_to(self.buffer_offset);
            return;
        }

        let mut preview = String::with_capacity(open.content.len() + partial.len() + 1);
        preview.push_str(&open.content);
        if open.line_count > 0 {
            preview.push('\n');
        }
        preview.push_str(partial);
        artifact.set_content(&preview);
        artifact.extend_to(self.buffer_offset + self.buffer.len());
    }

    /// The buffered tail without a `\r` that may still turn into a line ending
    fn partial_line(&self) -> &str {
        match self.crlf {
            Some(false) => &self.buffer,
            _ => self.buffer.strip_suffix('\r').unwrap_or(&self.buffer),
        }
    }

    /// Accumulated prose plus the partial line when it cannot be a fence
    fn plain_text_view(&self) -> String {
        let partial = self.partial_line();
        if self.open.is_some() || partial.is_empty() || partial.starts_with('`') {
            return self.plain_text.clone();
        }
        let mut view = self.plain_text.clone();
        if self.prose_lines > 0 {
            view.push('\n');
        }
        view.push_str(partial);
        view
    }

    fn record(&mut self, kind: DiagnosticKind, offset: usize, message: String) {
        let diagnostic = Diagnostic::new(kind, self.line_number, offset, message);
        tracing::debug!(
            code = kind.code(),
            line = diagnostic.line,
            offset,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }
}

/// `filename` > `language` > per-type generic name
fn default_title(artifact_type: ArtifactType, meta: &ArtifactMeta) -> String {
    meta.filename()
        .or_else(|| meta.language())
        .filter(|s| !s.is_empty())
        .unwrap_or(artifact_type.default_title())
        .to_string()
}
