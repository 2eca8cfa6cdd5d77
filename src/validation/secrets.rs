//! Hardcoded-credential scan over the raw configuration text.
//!
//! Matching is case-insensitive and runs on the unparsed text so that
//! secrets hidden in comments or unusual YAML layouts are still seen.
//! A match is dropped when a suppression marker (`secrets.`, `your_`, `#`)
//! applies to it; how far a marker reaches is set by [`SuppressionScope`].

use std::fmt;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Serialize;

/// Substrings that mark a match as a reference, placeholder or comment.
pub const SUPPRESSION_MARKERS: [&str; 3] = ["secrets.", "your_", "#"];

/// Kind of credential a pattern looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    /// `apikey:` followed by at least ten key characters.
    ApiKey,
    /// `password:` followed by a word character.
    Password,
    /// `secret:` followed by a word character.
    Secret,
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey => f.write_str("API key"),
            Self::Password => f.write_str("password"),
            Self::Secret => f.write_str("secret"),
        }
    }
}

/// How far a suppression marker reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionScope {
    /// A marker anywhere in the file silences every match (legacy behavior).
    #[default]
    File,
    /// A marker only silences matches on its own line; `#` must precede
    /// the match.
    Line,
}

static PATTERNS: LazyLock<[(SecretKind, Regex); 3]> = LazyLock::new(|| {
    [
        (
            SecretKind::ApiKey,
            Regex::new(r"(?i-u)apikey:(?u:\s)*[a-z0-9_-]{10,}").expect("valid regex"),
        ),
        (
            SecretKind::Password,
            Regex::new(r"(?i-u)password:(?u:\s)*[a-z0-9_]+").expect("valid regex"),
        ),
        (
            SecretKind::Secret,
            Regex::new(r"(?i-u)secret:(?u:\s)*[a-z0-9_]+").expect("valid regex"),
        ),
    ]
});

/// An unsuppressed credential match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    /// Which pattern matched.
    pub kind: SecretKind,
    /// 1-based line where the match starts.
    pub line: usize,
    /// Byte offset of the match start.
    pub offset: usize,
}

/// Scans `text` and returns the earliest unsuppressed finding.
#[must_use]
pub fn scan(text: &str, scope: SuppressionScope) -> Option<Finding> {
    if scope == SuppressionScope::File
        && SUPPRESSION_MARKERS.iter().any(|marker| text.contains(marker))
    {
        tracing::debug!("suppression marker present, skipping sensitive-data matches");
        return None;
    }

    PATTERNS
        .iter()
        .flat_map(|(kind, re)| re.find_iter(text).map(move |m| (*kind, m.start())))
        .filter(|(_, offset)| scope == SuppressionScope::File || !line_suppresses(text, *offset))
        .min_by_key(|(_, offset)| *offset)
        .map(|(kind, offset)| Finding {
            kind,
            line: line_number(text, offset),
            offset,
        })
}

/// Returns whether the line containing `offset` carries a marker for it.
fn line_suppresses(text: &str, offset: usize) -> bool {
    let start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = text[offset..].find('\n').map_or(text.len(), |i| offset + i);
    let line = &text[start..end];

    line.contains("secrets.") || line.contains("your_") || text[start..offset].contains('#')
}

fn line_number(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}
