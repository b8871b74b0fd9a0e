//! Application-boundary facade.
//!
//! `SuggestEngine` owns every piece of mutable state: the published
//! lexicon, the usage tracker and the config store. Queries and usage
//! updates run synchronously on the caller's thread; corpus loading runs on
//! a background worker.


use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hex_core::config_store::ConfigStore;
use hex_core::ranking::{clamp_limit, suggest};
use hex_core::settings::{settings, validate, Settings};
use hex_core::usage::{UsageCounters, UsageTracker};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::loader::{CorpusWorker, LexiconSlot, LoadPlan};
use crate::paths::DataPaths;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub paths: DataPaths,
    pub settings: Settings,
}

impl EngineConfig {
    /// `paths` with the process-wide settings.
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            settings: settings().clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconStats {
    pub terms: usize,
    /// 0 until the first load has been published.
    pub generation: u64,
}

pub struct SuggestEngine {
    settings: Settings,
    store: Arc<ConfigStore>,
    usage: UsageTracker,
    slot: Arc<LexiconSlot>,
    worker: CorpusWorker,
}

impl SuggestEngine {
    /// Load usage counters, start the corpus worker and queue the first
    /// load. Returns before the corpus is ready.
    pub fn init(config: EngineConfig) -> Result<Self, EngineError> {
        let EngineConfig { paths, settings } = config;
        validate(&settings)?;

        let store = Arc::new(ConfigStore::new(
            paths.config_file.clone(),
            settings.macros.slots,
        ));
        let usage = match UsageTracker::open(Arc::clone(&store)) {
            Ok(tracker) => tracker,
            Err(e) => {
                warn!(error = %e, "config document unreadable, starting without usage");
                UsageTracker::empty(Arc::clone(&store))
            }
        };

        let plan = LoadPlan {
            sources: paths.corpus_sources(&settings.corpus),
            base_cache: paths.base_cache_file(&settings.corpus),
            base_url: settings.corpus.base_url.clone(),
            fetch_timeout: settings.corpus.fetch_timeout(),
        };
        let slot = Arc::new(LexiconSlot::new());
        let worker = CorpusWorker::spawn(plan, Arc::clone(&slot))?;
        worker.submit();

        info!(config = %paths.config_file.display(), "engine initialised");
        Ok(Self {
            settings,
            store,
            usage,
            slot,
            worker,
        })
    }

    /// Up to `clamp(limit, 1, max_limit)` display forms completing `prefix`.
    /// Empty until the first corpus load has been published.
    pub fn suggest(&self, prefix: &str, limit: i64) -> Vec<String> {
        let ranking = &self.settings.ranking;
        let limit = clamp_limit(limit, ranking.max_limit);
        let lexicon = self.slot.current();
        let usage = self.usage.snapshot();
        suggest(&lexicon, &usage, prefix, limit, ranking)
    }

    /// Count one acceptance of `term` and persist it. `false` if the term is
    /// invalid or could not be persisted.
    pub fn record_usage(&self, term: &str) -> bool {
        match self.usage.record(term) {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "failed to persist usage");
                false
            }
        }
    }

    /// Exactly `macros.slots` strings; empty slots if the document cannot
    /// be read.
    pub fn get_macros(&self) -> Vec<String> {
        self.store.macros().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read macros");
            vec![String::new(); self.store.macro_slots()]
        })
    }

    /// Replace the macro slots. `false` for more values than slots or on a
    /// persistence failure.
    pub fn set_macros(&self, values: &[String]) -> bool {
        match self.store.set_macros(values) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "failed to persist macros");
                false
            }
        }
    }

    /// Re-read all corpus sources in the background.
    pub fn reload(&self) {
        self.worker.submit();
    }

    pub fn is_ready(&self) -> bool {
        self.slot.published_generation() > 0
    }

    /// Block until a lexicon has been published or `timeout` elapses. Only
    /// for callers that can afford to wait (CLI, tests).
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.is_ready() {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
        true
    }

    pub fn usage_count(&self, term: &str) -> u64 {
        match hex_core::term::normalize_term(term) {
            Some(t) => self.usage.count(&t),
            None => 0,
        }
    }

    pub fn usage_snapshot(&self) -> Arc<UsageCounters> {
        self.usage.snapshot()
    }

    pub fn lexicon_stats(&self) -> LexiconStats {
        LexiconStats {
            terms: self.slot.current().len(),
            generation: self.slot.published_generation(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stop the corpus worker. Queries keep serving the last published
    /// lexicon; usage and macros keep working.
    pub fn shutdown(&self) {
        self.worker.shutdown();
    }
}

impl Drop for SuggestEngine {
    fn drop(&mut self) {
        self.worker.shutdown();
    }
}
