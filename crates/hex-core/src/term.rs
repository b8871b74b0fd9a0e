//! Line-level term parsing shared by corpus loading and usage recording.
//!
//! A corpus line is `display[\tweight]`. The same validity rules gate both
//! dictionary entries and "term accepted" events, so nothing the corpus
//! would reject can reach the usage store.

use crate::unicode::{collapse_whitespace, is_valid_term};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTerm {
    /// Canonical lowercase key.
    pub term: String,
    /// Human-facing form with whitespace collapsed.
    pub display: String,
    /// Always >= 1.
    pub weight: u64,
}

/// Parse one raw line. Returns `None` for blank, comment and invalid lines.
pub fn parse_line(raw: &str) -> Option<ParsedTerm> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (source, weight) = split_weight(line);

    let display = collapse_whitespace(source);
    if display.is_empty() {
        return None;
    }
    let term = display.to_lowercase();
    if !is_valid_term(&term) {
        return None;
    }

    Some(ParsedTerm {
        term,
        display,
        weight: weight.max(1),
    })
}

/// Normalize a raw term (no weight column) to its canonical key.
pub fn normalize_term(raw: &str) -> Option<String> {
    parse_line(raw).map(|p| p.term)
}

/// Split off a trailing `\t<digits>` weight column, if present.
fn split_weight(line: &str) -> (&str, u64) {
    let Some((head, tail)) = line.rsplit_once('\t') else {
        return (line, 1);
    };
    let tail = tail.trim();
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return (line, 1);
    }
    // All digits: only overflow can fail, which saturates.
    let weight = tail.parse::<u64>().unwrap_or(u64::MAX);
    (head, weight)
}
