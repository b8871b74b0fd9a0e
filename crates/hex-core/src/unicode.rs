//! Character-level classification for dictionary terms and display forms.

/// Punctuation allowed inside a term besides alphanumerics.
pub const TERM_PUNCTUATION: [char; 4] = [' ', '\'', '-', '.'];

/// A character that may appear anywhere in a term.
pub fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || TERM_PUNCTUATION.contains(&c)
}

/// Term validity predicate on an already-lowercased string.
///
/// Non-empty, starts with an alphanumeric, uses only term characters and
/// contains at least one alphabetic character.
pub fn is_valid_term(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_alphanumeric() {
        return false;
    }
    s.chars().all(is_term_char) && s.chars().any(char::is_alphabetic)
}

/// True when lowercasing leaves the string unchanged.
pub fn is_all_lowercase(s: &str) -> bool {
    s.chars().flat_map(char::to_lowercase).eq(s.chars())
}

/// Simple Title-Case: purely alphabetic, first letter uppercase, remainder
/// lowercase ("Paris", not "PARIS", "McDonald" or "New York").
pub fn is_simple_title_case(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && s.chars().all(char::is_alphabetic)
        && chars.all(|c| c.is_lowercase())
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
