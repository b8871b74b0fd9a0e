//! Per-user JSON configuration document.
//!
//! One file holds the macro slots, the usage counters and whatever keys
//! other tools have written. Every write is read-merge-write under one lock
//! and lands via write-to-temp + rename, so readers see either the previous
//! complete document or the new one.


use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, debug_span};

use crate::usage::UsageCounters;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config document {} is not valid: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// The document as read. `macros` and `usage` are kept as raw JSON so a
/// write that only changes one of them puts the other back unchanged; the
/// accessors below decode them leniently. Every other key is
/// carried through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    macros: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    usage: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that is present, even as `null`, stays `Some`.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

impl ConfigDocument {
    /// Exactly `slots` macros. Non-string entries read as empty slots; a
    /// missing or non-list value reads as all empty.
    pub fn macros(&self, slots: usize) -> Vec<String> {
        let mut out: Vec<String> = match &self.macros {
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().unwrap_or_default().to_string())
                .collect(),
            _ => Vec::new(),
        };
        out.resize(slots, String::new());
        out
    }

    pub fn set_macros(&mut self, values: Vec<String>) {
        self.macros = Some(Value::from(values));
    }

    /// Counters whose value is a non-negative integer. Anything else is
    /// skipped.
    pub fn usage(&self) -> UsageCounters {
        match &self.usage {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(k, v)| v.as_u64().map(|n| (k.clone(), n)))
                .collect(),
            _ => UsageCounters::new(),
        }
    }

    pub fn set_usage(&mut self, counters: &UsageCounters) {
        self.usage = Some(Value::Object(
            counters
                .iter()
                .map(|(term, count)| (term.clone(), Value::from(*count)))
                .collect(),
        ));
    }

    /// Seed absent `macros`/`usage` keys so a written document always has
    /// both. Present values are left as they are.
    fn fill_missing(&mut self, slots: usize) {
        if self.macros.is_none() {
            self.set_macros(vec![String::new(); slots]);
        }
        if self.usage.is_none() {
            self.usage = Some(Value::Object(Map::new()));
        }
    }
}

pub struct ConfigStore {
    path: PathBuf,
    macro_slots: usize,
    lock: Mutex<()>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>, macro_slots: usize) -> Self {
        Self {
            path: path.into(),
            macro_slots,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn macro_slots(&self) -> usize {
        self.macro_slots
    }

    /// Sibling file that receives a write before it is renamed into place.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Take the store lock. All document reads and writes, and any
    /// in-memory state mirrored from the document, go through a guard.
    pub fn lock(&self) -> ConfigGuard<'_> {
        ConfigGuard {
            store: self,
            _guard: self.lock.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        self.lock().load()
    }

    /// Read-merge-write: load the current document, apply `f`, commit.
    pub fn update<T>(&self, f: impl FnOnce(&mut ConfigDocument) -> T) -> Result<T, ConfigError> {
        let guard = self.lock();
        let mut doc = guard.load()?;
        let out = f(&mut doc);
        guard.commit(&doc)?;
        Ok(out)
    }

    pub fn macros(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.load()?.macros(self.macro_slots))
    }

    /// Replace the macro slots. More values than slots is rejected with
    /// `Ok(false)` and nothing is written; fewer are padded with empties.
    pub fn set_macros(&self, values: &[String]) -> Result<bool, ConfigError> {
        if values.len() > self.macro_slots {
            return Ok(false);
        }
        let slots = self.macro_slots;
        let mut padded = values.to_vec();
        padded.resize(slots, String::new());
        self.update(|doc| doc.set_macros(padded))?;
        Ok(true)
    }

    fn io_err(&self, source: io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Proof of holding the store lock.
pub struct ConfigGuard<'a> {
    store: &'a ConfigStore,
    _guard: MutexGuard<'a, ()>,
}

impl ConfigGuard<'_> {
    /// Load the document fresh from disk. A missing file is an empty
    /// document; absent `macros`/`usage` keys are seeded empty.
    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        let store = self.store;
        let mut doc = match fs::read(&store.path) {
            Ok(bytes) => {
                serde_json::from_slice::<ConfigDocument>(&bytes).map_err(|source| {
                    ConfigError::Parse {
                        path: store.path.clone(),
                        source,
                    }
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => ConfigDocument::default(),
            Err(e) => return Err(store.io_err(e)),
        };
        doc.fill_missing(store.macro_slots);
        Ok(doc)
    }

    /// Atomically replace the document: write and sync the staging file,
    /// then rename it over the target.
    pub fn commit(&self, doc: &ConfigDocument) -> Result<(), ConfigError> {
        let store = self.store;
        let _span = debug_span!("config_commit", path = %store.path.display()).entered();

        let bytes = serde_json::to_vec_pretty(doc).map_err(ConfigError::Serialize)?;
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| store.io_err(e))?;
            }
        }

        let tmp = store.staging_path();
        let staged = write_synced(&tmp, &bytes).and_then(|()| fs::rename(&tmp, &store.path));
        if let Err(e) = staged {
            let _ = fs::remove_file(&tmp);
            return Err(store.io_err(e));
        }

        debug!(bytes = bytes.len(), "config document committed");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
