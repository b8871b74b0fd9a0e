use std::fs;
use std::sync::Arc;
use std::thread;

use serde_json::{json, Value};

use super::*;

fn store_in(dir: &tempfile::TempDir) -> Arc<ConfigStore> {
    Arc::new(ConfigStore::new(dir.path().join("config.json"), 7))
}

#[test]
fn record_increments_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let tracker = UsageTracker::open(Arc::clone(&store)).unwrap();

    assert!(tracker.record("Cab").unwrap());
    assert!(tracker.record("  cab ").unwrap());
    assert_eq!(tracker.count("cab"), 2);

    let doc = store.load().unwrap();
    assert_eq!(doc.usage()["cab"], 2);
}

#[test]
fn record_rejects_invalid_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let tracker = UsageTracker::open(Arc::clone(&store)).unwrap();

    assert!(!tracker.record("").unwrap());
    assert!(!tracker.record("1234").unwrap());
    assert!(!tracker.record("#comment").unwrap());
    assert!(!store.path().exists());
    assert!(tracker.snapshot().is_empty());
}

#[test]
fn reopen_restores_counters() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    {
        let tracker = UsageTracker::open(Arc::clone(&store)).unwrap();
        tracker.record("hello").unwrap();
        tracker.record("hello").unwrap();
        tracker.record("world").unwrap();
    }
    let tracker = UsageTracker::open(store).unwrap();
    assert_eq!(tracker.count("hello"), 2);
    assert_eq!(tracker.count("world"), 1);
}

#[test]
fn record_preserves_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        json!({"macros": ["hi", "", "", "", "", "", ""], "theme": "dark"}).to_string(),
    )
    .unwrap();

    let tracker = UsageTracker::open(Arc::clone(&store)).unwrap();
    tracker.record("hello").unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.macros(7)[0], "hi");
    assert_eq!(doc.extra["theme"], "dark");
    assert_eq!(doc.usage()["hello"], 1);
}

#[test]
fn record_keeps_macros_set_between_uses() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let tracker = UsageTracker::open(Arc::clone(&store)).unwrap();

    tracker.record("alpha").unwrap();
    assert!(store.set_macros(&["sig".to_string()]).unwrap());
    tracker.record("beta").unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.macros(7)[0], "sig");
    assert_eq!(doc.usage().len(), 2);
}

#[test]
fn record_writes_macros_back_as_read() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let macros = json!(["a", {"cmd": "ctrl+c"}, 5]);
    fs::write(
        store.path(),
        json!({"macros": macros, "usage": {}, "theme": "dark"}).to_string(),
    )
    .unwrap();

    let tracker = UsageTracker::open(Arc::clone(&store)).unwrap();
    assert!(tracker.record("hello").unwrap());

    let on_disk: Value = serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
    assert_eq!(on_disk["macros"], macros);
    assert_eq!(on_disk["theme"], "dark");
    assert_eq!(on_disk["usage"], json!({"hello": 1}));
}

#[test]
fn open_normalizes_persisted_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        json!({"usage": {"Hello": 2, "hello": 3, "!!": 9, "ok": "x"}}).to_string(),
    )
    .unwrap();

    let tracker = UsageTracker::open(store).unwrap();
    let snap = tracker.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap["hello"], 5);
}

#[test]
fn open_fails_on_corrupt_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "{not json").unwrap();
    assert!(matches!(
        UsageTracker::open(Arc::clone(&store)),
        Err(ConfigError::Parse { .. })
    ));

    // Falling back to empty must not clobber the unreadable file.
    let tracker = UsageTracker::empty(Arc::clone(&store));
    assert!(tracker.record("hello").is_err());
    assert_eq!(tracker.count("hello"), 0);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "{not json");
}

#[test]
fn snapshot_is_stable_across_updates() {
    let dir = tempfile::tempdir().unwrap();
    let tracker = UsageTracker::open(store_in(&dir)).unwrap();
    tracker.record("one").unwrap();
    let before = tracker.snapshot();
    tracker.record("two").unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(tracker.snapshot().len(), 2);
}

#[test]
fn concurrent_records_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let tracker = Arc::new(UsageTracker::open(Arc::clone(&store)).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tracker = Arc::clone(&tracker);
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..10 {
                    tracker.record("shared").unwrap();
                }
                store.set_macros(&[format!("m{i}")]).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(tracker.count("shared"), 40);
    let doc = store.load().unwrap();
    assert_eq!(doc.usage()["shared"], 40);
    assert!(doc.macros(7)[0].starts_with('m'));
}

#[test]
fn normalize_counters_sums_and_drops() {
    let raw: UsageCounters = [("A b".to_string(), 1), ("a  b".to_string(), 2), ("".to_string(), 5)]
        .into_iter()
        .collect();
    let out = normalize_counters(raw);
    assert_eq!(out.len(), 1);
    assert_eq!(out["a b"], 3);
}
