//! Fence line grammar
//!
//! Classifies a single line (already stripped of its line terminator) into
//! one of the fence forms:
//!
//! ```text
//! ```artifact type="svg" title="Logo" x-theme="dark"   attributed opener
//! ```rust                                              generic opener
//! ```                                                  bare fence (close, or opener without language)
//! ```!!!                                               malformed
//! ```
//!
//! Classification is context free; the parser decides what a bare fence
//! means from its own state.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fence token
pub const FENCE: &str = "```";

/// Marker word of the attributed form
pub const ARTIFACT_MARKER: &str = "artifact";

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_:\-]*)\s*=\s*"((?:[^"\\]|\\.)*)""#)
        .expect("attribute pattern is valid")
});

static LANGUAGE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_+#.\-]+$").expect("language pattern is valid"));

static ATTRIBUTE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_:\-]*$").expect("key pattern is valid"));

/// Attributes carried by an attributed opener, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceAttributes {
    /// `(key, unescaped value)` in source order
    pub pairs: Vec<(String, String)>,
    /// Non-whitespace text that was not a `key="value"` pair
    pub residue: String,
}

impl FenceAttributes {
    /// Last value given for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What a single line is, fence-wise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceLine {
    /// Exactly the fence token, optionally followed by whitespace
    Bare,
    /// ```` ```artifact key="value"... ````
    Attributed(FenceAttributes),
    /// ```` ```lang ```` with a non-empty language tag
    Generic {
        /// First word of the info string
        language: String,
    },
    /// Starts with the fence token but fits no form
    Malformed {
        /// Why the line fits no form
        reason: String,
    },
    /// Anything else
    Text,
}

impl FenceLine {
    /// True for lines that open a block when seen outside one
    #[inline]
    #[must_use]
    pub fn is_opener(&self) -> bool {
        matches!(self, Self::Attributed(_) | Self::Generic { .. })
    }
}

/// Classify one line
#[must_use]
pub fn classify(line: &str) -> FenceLine {
    let Some(rest) = line.strip_prefix(FENCE) else {
        return FenceLine::Text;
    };
    let rest = rest.trim_end();

    if rest.is_empty() {
        return FenceLine::Bare;
    }

    if let Some(attrs) = rest.strip_prefix(ARTIFACT_MARKER) {
        if attrs.is_empty() || attrs.starts_with(char::is_whitespace) {
            return FenceLine::Attributed(parse_attributes(attrs));
        }
    }

    if rest.contains(ARTIFACT_MARKER) {
        return FenceLine::Malformed {
            reason: format!("fence info '{rest}' mentions '{ARTIFACT_MARKER}' but is not an attributed opener"),
        };
    }

    let tag = rest.split_whitespace().next().unwrap_or_default();
    if rest.starts_with(char::is_whitespace) || !LANGUAGE_TAG.is_match(tag) {
        return FenceLine::Malformed {
            reason: format!("unrecognized fence info '{rest}'"),
        };
    }

    FenceLine::Generic {
        language: tag.to_string(),
    }
}

/// True when a partial line could still turn out to be a bare fence
#[must_use]
pub fn could_become_bare(partial: &str) -> bool {
    FENCE.starts_with(partial)
        || partial
            .strip_prefix(FENCE)
            .is_some_and(|rest| rest.chars().all(char::is_whitespace))
}

/// Extract `key="value"` pairs from the text after the marker
#[must_use]
pub fn parse_attributes(input: &str) -> FenceAttributes {
    let mut attrs = FenceAttributes::default();
    let mut last_end = 0;

    for caps in ATTRIBUTE.captures_iter(input) {
        let (Some(whole), Some(key), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        push_residue(&mut attrs.residue, &input[last_end..whole.start()]);
        last_end = whole.end();
        attrs
            .pairs
            .push((key.as_str().to_string(), unescape(value.as_str())));
    }
    push_residue(&mut attrs.residue, &input[last_end..]);

    attrs
}

fn push_residue(residue: &mut String, gap: &str) {
    let gap = gap.trim();
    if gap.is_empty() {
        return;
    }
    if !residue.is_empty() {
        residue.push(' ');
    }
    residue.push_str(gap);
}

/// True if `key` can be written as an attribute name
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    ATTRIBUTE_KEY.is_match(key)
}

/// Escape a value for a double-quoted attribute
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape`]; unknown escapes are kept verbatim
#[must_use]
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
