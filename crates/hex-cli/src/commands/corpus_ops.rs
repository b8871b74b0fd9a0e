use hex_core::corpus::load_sources;
use hex_core::lexicon::Lexicon;
use hex_core::settings::settings;
use hexkeys_engine::fetch::{ensure_base_corpus, FetchOutcome};
use hexkeys_engine::DataPaths;

pub fn info(paths: &DataPaths) {
    let corpus = &settings().corpus;
    let sources = paths.corpus_sources(corpus);
    for source in &sources {
        let status = if source.path.exists() { "ok" } else { "missing" };
        println!("{:<8}{:<9}{}", format!("{:?}", source.kind), status, source.path.display());
    }

    let lexicon = Lexicon::from_corpus(load_sources(&sources));
    let cased = lexicon
        .display()
        .iter()
        .filter(|(term, display)| term != display)
        .count();
    println!("---");
    println!("{} indexed terms, {} with custom display forms", lexicon.len(), cased);
}

pub fn fetch(paths: &DataPaths) {
    let corpus = &settings().corpus;
    let dest = paths.base_cache_file(corpus);
    let outcome = die!(
        ensure_base_corpus(&dest, &corpus.base_url, corpus.fetch_timeout()),
        "Error fetching base corpus: {}"
    );
    match outcome {
        FetchOutcome::Cached => println!("{} (already exists, skipping)", dest.display()),
        FetchOutcome::Disabled => println!("corpus.base_url is empty, nothing to fetch"),
        FetchOutcome::Downloaded { bytes } => println!(
            "Wrote {} ({:.1} KB)",
            dest.display(),
            bytes as f64 / 1024.0
        ),
    }
}
