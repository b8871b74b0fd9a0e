//! Background corpus loading.
//!
//! A single worker thread fetches the base list (if needed), merges all
//! sources and publishes the resulting [`Lexicon`] with one pointer swap.
//! The serving path never waits on it: until the first publish, readers get
//! an empty lexicon.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError, RwLock};
use std::thread;
use std::time::Duration;

use hex_core::corpus::{load_sources, CorpusSource};
use hex_core::lexicon::Lexicon;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::fetch::{ensure_base_corpus, FetchOutcome};

// ---------------------------------------------------------------------------
// Published lexicon
// ---------------------------------------------------------------------------

/// Holds the current lexicon. Swapped wholesale; readers clone the `Arc`
/// and keep using it even if a newer one is published meanwhile.
pub(crate) struct LexiconSlot {
    current: RwLock<Arc<Lexicon>>,
    /// Generation of the published lexicon; 0 until the first publish.
    published: AtomicU64,
}

impl LexiconSlot {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Lexicon::empty())),
            published: AtomicU64::new(0),
        }
    }

    pub fn current(&self) -> Arc<Lexicon> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn published_generation(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }

    /// Publish `lexicon` unless `generation` has been superseded.
    fn publish_if_current(&self, lexicon: Lexicon, generation: u64, latest: &AtomicU64) -> bool {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if generation != latest.load(Ordering::SeqCst) {
            return false;
        }
        *guard = Arc::new(lexicon);
        self.published.store(generation, Ordering::SeqCst);
        true
    }
}

// ---------------------------------------------------------------------------
// Work types
// ---------------------------------------------------------------------------

/// Everything the worker needs to perform a load.
pub(crate) struct LoadPlan {
    pub sources: Vec<CorpusSource>,
    pub base_cache: PathBuf,
    pub base_url: String,
    pub fetch_timeout: Duration,
}

struct LoadWork {
    generation: u64,
}

// ---------------------------------------------------------------------------
// CorpusWorker
// ---------------------------------------------------------------------------

pub(crate) struct CorpusWorker {
    /// `None` once shut down.
    tx: Mutex<Option<mpsc::Sender<LoadWork>>>,
    generation: Arc<AtomicU64>,
}

impl CorpusWorker {
    pub fn spawn(plan: LoadPlan, slot: Arc<LexiconSlot>) -> Result<Self, EngineError> {
        let generation = Arc::new(AtomicU64::new(0));
        let (tx, rx) = mpsc::channel::<LoadWork>();
        {
            let generation = Arc::clone(&generation);
            thread::Builder::new()
                .name("hexkeys-corpus".into())
                .spawn(move || load_worker(rx, generation, plan, slot))
                .map_err(|e| EngineError::Internal {
                    msg: format!("failed to spawn corpus worker: {e}"),
                })?;
        }
        Ok(Self {
            tx: Mutex::new(Some(tx)),
            generation,
        })
    }

    /// Queue a (re)load. Supersedes any load still queued or running.
    pub fn submit(&self) {
        let tx = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = tx.as_ref() else {
            return;
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = tx.send(LoadWork { generation });
    }

    /// Stop accepting work and discard whatever is in flight. Does not
    /// wait for the thread.
    pub fn shutdown(&self) {
        let mut tx = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        if tx.take().is_some() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            debug!("corpus worker shut down");
        }
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn load_worker(
    rx: mpsc::Receiver<LoadWork>,
    generation: Arc<AtomicU64>,
    plan: LoadPlan,
    slot: Arc<LexiconSlot>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple loads queued, skip to latest
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if latest.generation != generation.load(Ordering::SeqCst) {
            continue;
        }

        match ensure_base_corpus(&plan.base_cache, &plan.base_url, plan.fetch_timeout) {
            Ok(FetchOutcome::Downloaded { bytes }) => debug!(bytes, "base corpus fetched"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "base corpus fetch failed, using local data"),
        }

        let lexicon = Lexicon::from_corpus(load_sources(&plan.sources));
        let terms = lexicon.len();

        if slot.publish_if_current(lexicon, latest.generation, &generation) {
            info!(terms, generation = latest.generation, "lexicon published");
        } else {
            debug!(generation = latest.generation, "stale load discarded");
        }
    }
}
