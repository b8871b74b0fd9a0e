use std::time::Duration;

use hexkeys_engine::{DataPaths, EngineConfig, SuggestEngine};

/// Generous: the first run may download the base word list.
const READY_TIMEOUT: Duration = Duration::from_secs(120);

pub fn suggest(paths: DataPaths, prefix: &str, limit: i64) {
    let engine = die!(
        SuggestEngine::init(EngineConfig::new(paths)),
        "Error starting engine: {}"
    );
    if !engine.wait_ready(READY_TIMEOUT) {
        eprintln!("Error: corpus did not load within {}s", READY_TIMEOUT.as_secs());
        std::process::exit(1);
    }

    let results = engine.suggest(prefix, limit);
    if results.is_empty() {
        println!("(no suggestions)");
        return;
    }
    for (i, display) in results.iter().enumerate() {
        println!("{:>2}. {display}", i + 1);
    }
}
