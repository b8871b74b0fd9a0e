//! Sorted term list with bounded prefix-range scans.

use crate::corpus::FrequencyTable;

/// Immutable, lexicographically sorted list of every term with a non-zero
/// frequency. Rebuilt wholesale; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionIndex {
    terms: Vec<String>,
}

impl SuggestionIndex {
    pub fn build(frequencies: &FrequencyTable) -> Self {
        // BTreeMap iteration is already in byte order.
        let terms: Vec<String> = frequencies
            .iter()
            .filter(|&(_, &freq)| freq > 0)
            .map(|(term, _)| term.clone())
            .collect();
        debug_assert!(terms.windows(2).all(|w| w[0] < w[1]));
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Terms starting with `prefix`, in index order, at most `scan_cap` of
    /// them. Matches past the cap are never looked at, so on very short
    /// prefixes the best-scoring term can be missed.
    pub fn prefix_range<'a>(
        &'a self,
        prefix: &'a str,
        scan_cap: usize,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let start = self.terms.partition_point(|t| t.as_str() < prefix);
        self.terms[start..]
            .iter()
            .take(scan_cap)
            .take_while(move |t| t.starts_with(prefix))
            .map(String::as_str)
    }
}
