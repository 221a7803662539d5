//! Line Module
//!
//! Classification and validation of the raw lines of a store file.
//!
//! ## Line Grammar
//! ```text
//! #anything        comment, kept verbatim
//! (≤ 1 char)       blank, dropped on load
//! key=value        entry, exactly one '='
//! ```
//!
//! Anything else is rejected at load time with its 1-based line number.

use crate::error::{NoteError, Result};

const SEPARATOR: char = '=';
const COMMENT_PREFIX: char = '#';

/// A single classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Starts with `#`
    Comment(&'a str),

    /// At most one character long
    Blank,

    /// A `key=value` pair
    Entry { key: &'a str, value: &'a str },

    /// Violates the grammar
    Invalid,
}

impl<'a> Line<'a> {
    /// Classify a raw line
    pub fn classify(raw: &'a str) -> Self {
        // Length check comes first: "=", "#" and "x" are all blank.
        if raw.chars().count() <= 1 {
            return Line::Blank;
        }
        // Comments are checked before the '=' count: `#a=b=c` is a comment,
        // not a malformed entry.
        if raw.starts_with(COMMENT_PREFIX) {
            return Line::Comment(raw);
        }

        let mut parts = raw.splitn(3, SEPARATOR);
        let head = parts.next().unwrap_or_default();
        match (parts.next(), parts.next()) {
            (Some(value), None) => Line::Entry { key: head, value },
            _ => Line::Invalid,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Line::Blank)
    }
}

/// Key of an entry line, `None` for comments, blanks and invalid lines
pub fn key_of(raw: &str) -> Option<&str> {
    match Line::classify(raw) {
        Line::Entry { key, .. } => Some(key),
        _ => None,
    }
}

/// Value of an entry line (text after the `=`)
pub fn value_of(raw: &str) -> Option<&str> {
    match Line::classify(raw) {
        Line::Entry { value, .. } => Some(value),
        _ => None,
    }
}

/// Split file content into raw lines
///
/// Strips one trailing `\r` per line so CRLF files load like LF files.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Join lines back into file content
pub fn join_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Validate every line and drop blanks
///
/// Fails on the first invalid line, reporting its 1-based position in the
/// input. Order of the surviving lines is preserved.
pub fn validate_and_compact(lines: Vec<String>) -> Result<Vec<String>> {
    for (index, raw) in lines.iter().enumerate() {
        if Line::classify(raw) == Line::Invalid {
            return Err(NoteError::InvalidLineFormat {
                line_number: index + 1,
                content: raw.clone(),
            });
        }
    }

    Ok(lines
        .into_iter()
        .filter(|raw| !Line::classify(raw).is_blank())
        .collect())
}

/// Render a `key=value` line, rejecting pairs that would not load back
pub fn format_entry(key: &str, value: &str) -> Result<String> {
    if key.is_empty() {
        return Err(NoteError::InvalidEntry("key must not be empty".to_string()));
    }
    if key.starts_with(COMMENT_PREFIX) {
        return Err(NoteError::InvalidEntry(format!(
            "key {:?} must not start with '{}'",
            key, COMMENT_PREFIX
        )));
    }

    for (what, text) in [("key", key), ("value", value)] {
        if text.contains(|c: char| c == SEPARATOR || c == '\n' || c == '\r') {
            return Err(NoteError::InvalidEntry(format!(
                "{} {:?} must not contain '=' or line breaks",
                what, text
            )));
        }
    }

    Ok(format!("{}{}{}", key, SEPARATOR, value))
}
