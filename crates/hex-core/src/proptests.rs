//! Property-based tests over the parse → merge → rank pipeline.

use proptest::prelude::*;

use crate::corpus::{CorpusMerger, SourceKind};
use crate::index::SuggestionIndex;
use crate::lexicon::Lexicon;
use crate::ranking::{score, suggest};
use crate::settings::RankingSettings;
use crate::term::parse_line;
use crate::usage::UsageCounters;

fn params() -> RankingSettings {
    RankingSettings {
        usage_boost: 1000,
        scan_cap: 5000,
        max_limit: 10,
    }
}

fn arb_line() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z][a-zA-Z '.-]{0,8}",
        prop::option::of(0u64..500),
    )
        .prop_map(|(word, weight)| match weight {
            Some(w) => format!("{word}\t{w}"),
            None => word,
        })
}

fn arb_corpus() -> impl Strategy<Value = (Vec<String>, Vec<String>, Vec<String>)> {
    (
        prop::collection::vec(arb_line(), 0..40),
        prop::collection::vec(arb_line(), 0..10),
        prop::collection::vec(arb_line(), 0..10),
    )
}

fn merge(base: &[String], bundled: &[String], user: &[String]) -> Lexicon {
    let mut m = CorpusMerger::new();
    m.add_lines(SourceKind::Base, base);
    m.add_lines(SourceKind::Bundled, bundled);
    m.add_lines(SourceKind::User, user);
    Lexicon::from_corpus(m.finish())
}

proptest! {
    #[test]
    fn reparsing_display_is_idempotent(line in arb_line()) {
        if let Some(p) = parse_line(&line) {
            let again = parse_line(&p.display).expect("display must re-parse");
            prop_assert_eq!(&again.term, &p.term);
            prop_assert_eq!(&again.display, &p.display);
        }
    }

    #[test]
    fn identical_sources_give_identical_lexicons((base, bundled, user) in arb_corpus()) {
        let a = merge(&base, &bundled, &user);
        let b = merge(&base, &bundled, &user);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.index(), &SuggestionIndex::build(b.frequencies()));
    }

    #[test]
    fn suggestions_are_bounded_and_match_prefix(
        (base, bundled, user) in arb_corpus(),
        prefix in "[a-zA-Z]{1,2}",
        limit in -5i64..30,
    ) {
        let lex = merge(&base, &bundled, &user);
        let p = params();
        let limit = crate::ranking::clamp_limit(limit, p.max_limit);
        let got = suggest(&lex, &UsageCounters::new(), &prefix, limit, &p);
        prop_assert!(got.len() <= limit);
        let lower = prefix.to_lowercase();
        for display in &got {
            prop_assert!(display.to_lowercase().starts_with(&lower));
        }
    }

    #[test]
    fn ranking_is_score_ordered(
        (base, bundled, user) in arb_corpus(),
        used in prop::collection::vec(arb_line(), 0..5),
        prefix in "[a-z]",
    ) {
        let lex = merge(&base, &bundled, &user);
        let mut usage = UsageCounters::new();
        for line in &used {
            if let Some(p) = parse_line(line) {
                *usage.entry(p.term).or_insert(0) += 1;
            }
        }
        let got = suggest(&lex, &usage, &prefix, 10, &params());
        let scores: Vec<u64> = got
            .iter()
            .map(|display| {
                let term = display.to_lowercase();
                score(lex.frequency(&term), usage.get(&term).copied().unwrap_or(0), 1000)
            })
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
