use hex_core::usage::UsageTracker;
use hexkeys_engine::DataPaths;

use super::open_store;

pub fn record(paths: &DataPaths, term: &str) {
    let tracker = die!(
        UsageTracker::open(open_store(paths)),
        "Error opening config document: {}"
    );
    if die!(tracker.record(term), "Error saving usage: {}") {
        let key = hex_core::term::normalize_term(term).unwrap_or_default();
        println!("Recorded: {key} ({})", tracker.count(&key));
    } else {
        eprintln!("Rejected: {term:?} is not a valid term");
        std::process::exit(1);
    }
}

pub fn list(paths: &DataPaths) {
    let tracker = die!(
        UsageTracker::open(open_store(paths)),
        "Error opening config document: {}"
    );
    let snapshot = tracker.snapshot();
    if snapshot.is_empty() {
        println!("(empty)");
        return;
    }
    let mut entries: Vec<(&String, &u64)> = snapshot.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (term, count) in &entries {
        println!("{count}\t{term}");
    }
    println!("---");
    println!("{} terms", entries.len());
}
