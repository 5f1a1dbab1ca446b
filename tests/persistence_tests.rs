//! Persistence synchronization and fallback-policy tests.
//!
//! The policy under test: reads substitute documented defaults for
//! anything absent, corrupt, or version-mismatched (and write the
//! defaults back so the snapshot matches memory); writes are
//! best-effort and never disturb the in-memory state.

use std::fs;
use std::path::PathBuf;

use commander_tracker::core::{CounterType, PlayerId, PlayerMode};
use commander_tracker::state::GameStore;
use commander_tracker::storage::{keys, FileStore, MemoryStore, Storage, StorageError};

/// Fresh snapshot is written back on first load, so every reserved
/// table key exists afterwards.
#[test]
fn test_load_writes_defaults_back() {
    let mut store = GameStore::new(MemoryStore::new());
    store.load_all();

    let backend = store.storage();
    for key in [
        keys::LIFE_TOTALS,
        keys::COUNTERS,
        keys::PLAYER_MODES,
        keys::COMMANDER_DAMAGE,
        keys::PARTNER_TOGGLES,
    ] {
        assert!(backend.contains_key(key), "missing write-back for {key}");
    }
}

/// A corrupt document falls back to defaults and is repaired in place.
#[test]
fn test_corrupt_document_falls_back_to_defaults() {
    let mut backend = MemoryStore::new();
    backend.write(keys::LIFE_TOTALS, "{not json").unwrap();
    backend
        .write(keys::COMMANDER_DAMAGE, "{\"2\":\"not a row\"}")
        .unwrap();

    let mut store = GameStore::new(backend);
    store.load_all();

    for player in PlayerId::all(4) {
        assert_eq!(store.life(player), Some(40));
    }
    assert!(store.damage_matrix().is_empty());

    // Repaired: a reload parses cleanly.
    let raw = store.storage().read(keys::LIFE_TOTALS).unwrap().unwrap();
    assert!(raw.starts_with("{\"version\":1,"));
}

/// An unknown schema version is treated like a corrupt document.
#[test]
fn test_version_mismatch_falls_back_to_defaults() {
    let mut backend = MemoryStore::new();
    backend
        .write(keys::LIFE_TOTALS, "{\"version\":99,\"data\":[1,2,3,4]}")
        .unwrap();

    let mut store = GameStore::new(backend);
    store.load_all();

    for player in PlayerId::all(4) {
        assert_eq!(store.life(player), Some(40));
    }
}

/// A table persisted for a different roster size is not trusted.
#[test]
fn test_wrong_player_count_falls_back_to_defaults() {
    let mut backend = MemoryStore::new();
    backend
        .write(keys::LIFE_TOTALS, "{\"version\":1,\"data\":[10,20]}")
        .unwrap();

    let mut store = GameStore::new(backend);
    store.load_all();

    assert_eq!(store.life(PlayerId::new(1)), Some(40));
    assert_eq!(store.life(PlayerId::new(4)), Some(40));
}

/// State survives a full teardown/reopen cycle through the backend.
#[test]
fn test_state_survives_reopen() {
    let (p1, p2) = (PlayerId::new(1), PlayerId::new(2));

    let mut store = GameStore::new(MemoryStore::new());
    store.load_all();
    store.adjust_life(p1, -7);
    store.adjust_counter(p2, CounterType::Poison, 3);
    store.toggle_mode(p1, PlayerMode::Monarch);
    store.deal_combat_damage(p2, p1, 4);
    store.stage_damage(p2, p1, 2);

    let backend = store.into_storage();
    let mut reopened = GameStore::new(backend);
    reopened.load_all();

    assert_eq!(reopened.life(p1), Some(40 - 7 - 4));
    assert_eq!(reopened.counter(p2, CounterType::Poison), 3);
    assert!(reopened.has_mode(p1, PlayerMode::Monarch));
    assert_eq!(reopened.commander_damage(p2, p1), 4);
    assert_eq!(reopened.staged_damage(p2, p1), 2);
}

/// Pending sessions persist under their own per-player keys.
#[test]
fn test_pending_sessions_have_scoped_keys() {
    let (p1, p2, p3) = (PlayerId::new(1), PlayerId::new(2), PlayerId::new(3));

    let mut store = GameStore::new(MemoryStore::new());
    store.load_all();
    store.stage_damage(p1, p3, 2);
    store.stage_damage(p2, p3, 5);

    let backend = store.storage();
    assert!(backend.contains_key(&keys::pending_damage(p1)));
    assert!(backend.contains_key(&keys::pending_damage(p2)));
    assert!(!backend.contains_key(&keys::pending_damage(p3)));
}

/// A persisted session naming the initiating player or someone outside
/// the roster loses those entries on load, so a commit only applies
/// what actually lands in the matrix.
#[test]
fn test_tampered_session_entries_dropped_on_load() {
    let (p1, p2) = (PlayerId::new(1), PlayerId::new(2));

    let mut backend = MemoryStore::new();
    backend
        .write(
            &keys::pending_damage(p1),
            "{\"version\":1,\"data\":{\"1\":5,\"2\":3,\"7\":4}}",
        )
        .unwrap();

    let mut store = GameStore::new(backend);
    store.load_all();

    assert_eq!(store.staged_total(p1), 3);
    assert_eq!(store.commit_pending_damage(p1), 3);
    assert_eq!(store.life(p1), Some(37));
    assert_eq!(store.commander_damage(p2, p1), 3);
    assert_eq!(store.commander_damage(p1, p1), 0);
    assert!(!store.damage_matrix().has_row(PlayerId::new(7)));
}

/// A backend that refuses writes: reads work, writes and removes fail.
struct ReadOnlyStore {
    inner: MemoryStore,
}

impl Storage for ReadOnlyStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

/// Write failures keep the optimistic in-memory value and never reach
/// the caller.
#[test]
fn test_write_failure_keeps_memory_state() {
    let mut store = GameStore::new(ReadOnlyStore {
        inner: MemoryStore::new(),
    });
    store.load_all();

    let p1 = PlayerId::new(1);
    store.adjust_life(p1, -11);
    store.deal_combat_damage(PlayerId::new(2), p1, 3);
    store.reset_all();
    store.adjust_life(p1, 5);

    assert_eq!(store.life(p1), Some(45));
}

/// Full round trip against the file backend.
#[test]
fn test_file_backed_round_trip() {
    let dir: PathBuf = std::env::temp_dir().join(format!(
        "commander_tracker_persistence_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);

    let (p1, p4) = (PlayerId::new(1), PlayerId::new(4));

    let mut store = GameStore::new(FileStore::open(&dir).unwrap());
    store.load_all();
    store.adjust_life(p4, -21);
    store.adjust_counter(p1, CounterType::Experience, 2);
    drop(store);

    let mut reopened = GameStore::new(FileStore::open(&dir).unwrap());
    reopened.load_all();

    assert_eq!(reopened.life(p4), Some(19));
    assert_eq!(reopened.counter(p1, CounterType::Experience), 2);

    fs::remove_dir_all(&dir).unwrap();
}
