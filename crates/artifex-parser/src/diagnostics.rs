//! Diagnostic taxonomy
//!
//! Diagnostics describe input the parser had to degrade around. They are
//! recorded and logged, never returned as errors, and never change what a
//! parse produces.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// Fence-like line that matches no opener form, or opener with junk attributes
    MalformedFence,
    /// `type="..."` outside the closed set; the artifact fell back to `code`
    InvalidType,
    /// Stream ended while a fence was still open
    UnclosedFence,
}

impl DiagnosticKind {
    /// Stable telemetry code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedFence => "MALFORMED_FENCE",
            Self::InvalidType => "INVALID_TYPE",
            Self::UnclosedFence => "UNCLOSED_FENCE",
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line number in the stream
    pub line: usize,
    /// Byte offset of the line start
    pub offset: usize,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: DiagnosticKind, line: usize, offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            offset,
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.kind, self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_screaming_snake() {
        assert_eq!(DiagnosticKind::MalformedFence.code(), "MALFORMED_FENCE");
        assert_eq!(DiagnosticKind::InvalidType.code(), "INVALID_TYPE");
        assert_eq!(DiagnosticKind::UnclosedFence.code(), "UNCLOSED_FENCE");
        assert_eq!(
            serde_json::to_string(&DiagnosticKind::UnclosedFence).unwrap(),
            "\"UNCLOSED_FENCE\""
        );
    }

    #[test]
    fn display() {
        let d = Diagnostic::new(DiagnosticKind::InvalidType, 3, 40, "unknown type 'widget'");
        assert_eq!(d.to_string(), "INVALID_TYPE at line 3: unknown type 'widget'");
    }
}
