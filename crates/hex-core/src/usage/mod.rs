//! Usage tracking: how often the user accepted each term.
//!
//! Counters live in the config document under `usage`. Every accepted term
//! is persisted before `record` returns, and readers get a cheap `Arc`
//! snapshot that never waits on disk I/O.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, debug_span};

use crate::config_store::{ConfigError, ConfigStore};
use crate::term::normalize_term;

/// Term → acceptance count.
pub type UsageCounters = BTreeMap<String, u64>;

/// Re-key persisted counters through the term parser. Invalid keys are
/// dropped; keys that normalise to the same term are summed.
pub fn normalize_counters(raw: UsageCounters) -> UsageCounters {
    let mut out = UsageCounters::new();
    for (key, count) in raw {
        if let Some(term) = normalize_term(&key) {
            let c = out.entry(term).or_insert(0);
            *c = c.saturating_add(count);
        }
    }
    out
}

pub struct UsageTracker {
    store: Arc<ConfigStore>,
    snapshot: RwLock<Arc<UsageCounters>>,
}

impl UsageTracker {
    /// Load counters from the store.
    pub fn open(store: Arc<ConfigStore>) -> Result<Self, ConfigError> {
        let doc = store.load()?;
        let counters = normalize_counters(doc.usage());
        debug!(terms = counters.len(), "usage counters loaded");
        Ok(Self::with_counters(store, counters))
    }

    /// Start from no counters, e.g. when the document could not be read.
    pub fn empty(store: Arc<ConfigStore>) -> Self {
        Self::with_counters(store, UsageCounters::new())
    }

    fn with_counters(store: Arc<ConfigStore>, counters: UsageCounters) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Arc::new(counters)),
        }
    }

    /// Current counters. Holds the read lock only long enough to clone the
    /// `Arc`.
    pub fn snapshot(&self) -> Arc<UsageCounters> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn count(&self, term: &str) -> u64 {
        self.snapshot().get(term).copied().unwrap_or(0)
    }

    /// Count one acceptance of `raw` and persist all counters.
    ///
    /// Returns `Ok(false)` without touching anything when `raw` is not a
    /// valid term. On a persistence error the in-memory counters are left
    /// as they were.
    pub fn record(&self, raw: &str) -> Result<bool, ConfigError> {
        let Some(term) = normalize_term(raw) else {
            return Ok(false);
        };
        let _span = debug_span!("record_usage", term = %term).entered();

        let guard = self.store.lock();
        let mut doc = guard.load()?;

        let mut counters = UsageCounters::clone(&self.snapshot());
        let count = counters.entry(term).or_insert(0);
        *count = count.saturating_add(1);
        doc.set_usage(&counters);

        guard.commit(&doc)?;

        let mut published = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *published = Arc::new(counters);
        Ok(true)
    }
}
