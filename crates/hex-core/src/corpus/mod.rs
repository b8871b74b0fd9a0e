//! Corpus merging.
//!
//! Folds an ordered set of word lists into a frequency table and a display
//! (casing) table:
//!
//! - base lines add frequency and seed a lowercase display form,
//! - bundled lines only adjust casing,
//! - user lines add frequency and adjust casing with user precedence.
//!
//! Casing conflicts follow a fixed precedence, see [`CorpusMerger`].

mod source;

pub use source::{CorpusSource, SourceKind};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io;
use std::path::PathBuf;

use tracing::{debug, debug_span, info, warn};

use crate::term::parse_line;
use crate::unicode::{is_all_lowercase, is_simple_title_case};

/// Term → summed weight. Ordered so that iteration (and the index built from
/// it) is deterministic.
pub type FrequencyTable = BTreeMap<String, u64>;

/// Term → display form.
pub type DisplayTable = HashMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedCorpus {
    pub frequencies: FrequencyTable,
    pub display: DisplayTable,
}

/// Accepted/rejected line counts for one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub accepted: usize,
    pub rejected: usize,
}

/// Incremental merger. Feed sources in Base → Bundled → User order
/// ([`load_sources`] enforces this), then call [`CorpusMerger::finish`].
///
/// Display precedence for an incoming `display` against an `existing` entry:
///
/// 1. a simple Title-Case rendering of a single-word base term never
///    overrides (keeps "may" from becoming "May"),
/// 2. a cased form replaces an all-lowercase one,
/// 3. a cased user form replaces any different form,
/// 4. otherwise the first-seen form stays.
#[derive(Debug, Default)]
pub struct CorpusMerger {
    frequencies: FrequencyTable,
    display: DisplayTable,
    english_single: HashSet<String>,
}

impl CorpusMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lines<I, S>(&mut self, kind: SourceKind, lines: I) -> LineStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = LineStats::default();
        for line in lines {
            let line = line.as_ref();
            let Some(parsed) = parse_line(line) else {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    stats.rejected += 1;
                }
                continue;
            };
            stats.accepted += 1;

            match kind {
                SourceKind::Base => {
                    let freq = self.frequencies.entry(parsed.term.clone()).or_insert(0);
                    *freq = freq.saturating_add(parsed.weight);
                    if !parsed.term.contains(' ') {
                        self.english_single.insert(parsed.term.clone());
                    }
                    self.display
                        .entry(parsed.term.clone())
                        .or_insert(parsed.term);
                }
                SourceKind::Bundled => {
                    self.apply_display(parsed.term, parsed.display, false);
                }
                SourceKind::User => {
                    let freq = self.frequencies.entry(parsed.term.clone()).or_insert(0);
                    *freq = freq.saturating_add(parsed.weight);
                    self.apply_display(parsed.term, parsed.display, true);
                }
            }
        }
        stats
    }

    fn apply_display(&mut self, term: String, display: String, user_sourced: bool) {
        if self.english_single.contains(&term) && is_simple_title_case(&display) {
            return;
        }
        let Some(existing) = self.display.get_mut(&term) else {
            self.display.insert(term, display);
            return;
        };
        let incoming_cased = !is_all_lowercase(&display);
        if is_all_lowercase(existing) && incoming_cased {
            *existing = display;
        } else if user_sourced && incoming_cased && *existing != display {
            *existing = display;
        }
    }

    pub fn finish(self) -> MergedCorpus {
        MergedCorpus {
            frequencies: self.frequencies,
            display: self.display,
        }
    }
}

/// Load and merge `sources`. Missing files contribute nothing; unreadable
/// files are logged and skipped; malformed lines are dropped one by one.
pub fn load_sources(sources: &[CorpusSource]) -> MergedCorpus {
    let _span = debug_span!("load_sources", count = sources.len()).entered();

    let mut ordered: Vec<&CorpusSource> = sources.iter().collect();
    ordered.sort_by_key(|s| s.kind);

    let mut merger = CorpusMerger::new();
    for source in ordered {
        let bytes = match source.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(path = %source.path.display(), "corpus source missing, skipped");
                continue;
            }
            Err(e) => {
                warn!(error = %e, "corpus source unreadable, skipped");
                continue;
            }
        };
        let (lines, bad_utf8) = source::utf8_lines(&bytes);
        let mut stats = merger.add_lines(source.kind, lines);
        stats.rejected += bad_utf8;
        debug!(
            path = %source.path.display(),
            kind = ?source.kind,
            accepted = stats.accepted,
            rejected = stats.rejected,
            "corpus source merged"
        );
    }

    let merged = merger.finish();
    info!(terms = merged.frequencies.len(), "corpus merged");
    merged
}
