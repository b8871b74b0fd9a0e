//! The published, read-only result of one corpus load.

use crate::corpus::{DisplayTable, FrequencyTable, MergedCorpus};
use crate::index::SuggestionIndex;

/// Frequency table, display table and index from a single load. Shared
/// behind an `Arc` and replaced as a whole when a newer load completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    frequencies: FrequencyTable,
    display: DisplayTable,
    index: SuggestionIndex,
}

impl Lexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_corpus(corpus: MergedCorpus) -> Self {
        let index = SuggestionIndex::build(&corpus.frequencies);
        Self {
            frequencies: corpus.frequencies,
            display: corpus.display,
            index,
        }
    }

    pub fn frequency(&self, term: &str) -> u64 {
        self.frequencies.get(term).copied().unwrap_or(0)
    }

    /// Display form for `term`, falling back to the term itself.
    pub fn display_form<'a>(&'a self, term: &'a str) -> &'a str {
        self.display.get(term).map(String::as_str).unwrap_or(term)
    }

    pub fn index(&self) -> &SuggestionIndex {
        &self.index
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn display(&self) -> &DisplayTable {
        &self.display
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusMerger, SourceKind};

    #[test]
    fn display_falls_back_to_term() {
        let mut corpus = MergedCorpus::default();
        corpus.frequencies.insert("cat".into(), 3);
        let lex = Lexicon::from_corpus(corpus);
        assert_eq!(lex.display_form("cat"), "cat");
        assert_eq!(lex.frequency("cat"), 3);
        assert_eq!(lex.frequency("dog"), 0);
    }

    #[test]
    fn bundled_only_terms_are_not_indexed() {
        let mut m = CorpusMerger::new();
        m.add_lines(SourceKind::Base, ["cat\t2"]);
        m.add_lines(SourceKind::Bundled, ["Zanzibar"]);
        let lex = Lexicon::from_corpus(m.finish());
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.display_form("zanzibar"), "Zanzibar");
    }

    #[test]
    fn empty_lexicon() {
        let lex = Lexicon::empty();
        assert!(lex.is_empty());
        assert_eq!(lex.index().prefix_range("a", 10).count(), 0);
    }
}
