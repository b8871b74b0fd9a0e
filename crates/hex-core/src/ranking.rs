//! Prefix suggestion ranking.
//!
//! `score = usage * usage_boost + frequency`, highest first, ties broken by
//! term in ascending byte order. Fully deterministic for a given lexicon,
//! counter snapshot and prefix.

use std::cmp::Reverse;

use tracing::{debug, debug_span};

use crate::lexicon::Lexicon;
use crate::settings::RankingSettings;
use crate::usage::UsageCounters;

/// Clamp a caller-supplied limit into `1..=max_limit`.
pub fn clamp_limit(limit: i64, max_limit: usize) -> usize {
    let max = i64::try_from(max_limit.max(1)).unwrap_or(i64::MAX);
    // Within 1..=max, which came from a usize.
    limit.clamp(1, max) as usize
}

pub fn score(frequency: u64, usage: u64, usage_boost: u64) -> u64 {
    usage.saturating_mul(usage_boost).saturating_add(frequency)
}

/// Top display forms for `prefix`. The prefix is trimmed and lowercased;
/// an empty prefix yields nothing.
pub fn suggest(
    lexicon: &Lexicon,
    usage: &UsageCounters,
    prefix: &str,
    limit: usize,
    params: &RankingSettings,
) -> Vec<String> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }
    let limit = limit.clamp(1, params.max_limit.max(1));
    let _span = debug_span!("suggest", prefix = %prefix, limit).entered();

    let mut scored: Vec<(u64, &str)> = lexicon
        .index()
        .prefix_range(&prefix, params.scan_cap)
        .map(|term| {
            let used = usage.get(term).copied().unwrap_or(0);
            (score(lexicon.frequency(term), used, params.usage_boost), term)
        })
        .collect();

    let candidates = scored.len();
    scored.sort_unstable_by_key(|&(s, term)| (Reverse(s), term));
    scored.truncate(limit);
    debug!(candidates, returned = scored.len(), "ranked");

    scored
        .into_iter()
        .map(|(_, term)| lexicon.display_form(term).to_string())
        .collect()
}
