//! Store behavior over SIO inputs. Compiled only when the SIO backend is built.
#![cfg(feature = "sio")]

mod common;

use common::{make_event, run_of, write_file};
use eventio_store::{EventStore, StoreError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn example(dir: &TempDir) -> std::path::PathBuf {
    write_file(dir.path(), "sio_io/example.sio", 0..5)
}

#[test]
fn test_open_existing_file() {
    let dir = TempDir::new().unwrap();
    let filename = example(&dir);
    assert!(filename.is_file());

    let store = EventStore::open([&filename]).unwrap();
    assert!(store.is_open());
    assert_eq!(store.len(), 5);
    assert_eq!(store.position(), 0);
    assert_eq!(store.current_file_index(), Some(0));
    assert_eq!(store.filenames(), vec![filename.as_path()]);
}

#[test]
fn test_no_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("foo.sio");
    match EventStore::open([&missing]) {
        Err(StoreError::InvalidArgument(reason)) => assert!(reason.contains("foo.sio")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_bare_string_spec_rejected() {
    let dir = TempDir::new().unwrap();
    let filename = example(&dir);
    let as_string = filename.to_string_lossy().to_string();

    // Rejected for its shape even though the file exists.
    assert!(matches!(
        EventStore::from_spec(&json!(as_string)),
        Err(StoreError::InvalidArgument(_))
    ));
    assert!(matches!(
        EventStore::from_spec(&json!("foo.sio")),
        Err(StoreError::InvalidArgument(_))
    ));

    let store = EventStore::from_spec(&json!([as_string])).unwrap();
    assert_eq!(store.len(), 5);
}

#[test]
fn test_events_in_path_order() {
    let dir = TempDir::new().unwrap();
    let first = write_file(dir.path(), "a.sio", 0..3);
    let second = write_file(dir.path(), "b.sio", 10..12);

    let mut store = EventStore::open([&first, &second]).unwrap();
    assert_eq!(store.len(), 5);
    assert_eq!(store.entries_per_file(), vec![3, 2]);

    let mut runs = Vec::new();
    let mut files = Vec::new();
    loop {
        files.push(store.current_file_index());
        match store.next_event().unwrap() {
            Some(event) => runs.push(run_of(&event)),
            None => break,
        }
    }
    assert_eq!(runs, vec![0, 1, 2, 10, 11]);
    assert_eq!(
        files,
        vec![Some(0), Some(0), Some(0), Some(1), Some(1), None]
    );
}

#[test]
fn test_random_access() {
    let dir = TempDir::new().unwrap();
    let first = write_file(dir.path(), "a.sio", 0..3);
    let second = write_file(dir.path(), "b.sio", 10..13);
    let mut store = EventStore::open([&first, &second]).unwrap();

    assert_eq!(run_of(&store.event(4).unwrap()), 11);
    assert_eq!(store.position(), 0);
    assert!(matches!(
        store.event(6),
        Err(StoreError::EventOutOfRange { index: 6, entries: 6 })
    ));

    store.goto(3).unwrap();
    assert_eq!(run_of(&store.next_event().unwrap().unwrap()), 10);
    store.goto(6).unwrap();
    assert!(store.next_event().unwrap().is_none());
    assert!(matches!(store.goto(7), Err(StoreError::InvalidArgument(_))));

    store.rewind().unwrap();
    let all: Vec<_> = store.iter().map(|e| run_of(&e.unwrap())).collect();
    assert_eq!(all, vec![0, 1, 2, 10, 11, 12]);
}

#[test]
fn test_event_contents() {
    let dir = TempDir::new().unwrap();
    let filename = example(&dir);
    let mut store = EventStore::open([&filename]).unwrap();

    let event = store.event(3).unwrap();
    assert_eq!(event, make_event(3, 3));
    assert_eq!(event.get("hits").unwrap().len(), 3);
    assert_eq!(event.get("hits").unwrap().type_name(), "SimTrackerHit");
    assert!(event.get("nonexistent").is_none());

    let table = store.collection_id_table().unwrap();
    assert_eq!(table.id("MCParticles"), Some(1));
    assert_eq!(table.name(2), Some("hits"));
}

#[test]
fn test_independent_stores() {
    let dir = TempDir::new().unwrap();
    let filename = example(&dir);

    let mut a = EventStore::open([&filename]).unwrap();
    let mut b = EventStore::open([&filename]).unwrap();
    a.next_event().unwrap();
    a.next_event().unwrap();
    assert_eq!(a.position(), 2);
    assert_eq!(b.position(), 0);
    assert_eq!(run_of(&b.next_event().unwrap().unwrap()), 0);

    a.close();
    assert!(b.next_event().unwrap().is_some());
}

#[test]
fn test_close_releases_store() {
    let dir = TempDir::new().unwrap();
    let filename = example(&dir);
    let mut store = EventStore::open([&filename]).unwrap();
    store.close();
    assert!(!store.is_open());
    assert_eq!(store.current_file_index(), None);
    assert!(matches!(store.next_event(), Err(StoreError::Closed)));
    assert!(matches!(store.event(0), Err(StoreError::Closed)));
    // Closing twice is harmless.
    store.close();
}

#[test]
fn test_one_missing_input_fails_whole_construction() {
    let dir = TempDir::new().unwrap();
    let filename = example(&dir);
    let missing = dir.path().join("missing.sio");
    assert!(matches!(
        EventStore::open([&filename, &missing]),
        Err(StoreError::InvalidArgument(_))
    ));
}

#[test]
fn test_corrupt_input_is_invalid_argument() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.sio");
    fs::write(&path, b"not an sio file at all").unwrap();
    match EventStore::open([&path]) {
        Err(StoreError::InvalidArgument(reason)) => {
            assert!(reason.contains("cannot open as sio input"), "{reason}")
        }
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("dir.sio");
    fs::create_dir(&sub).unwrap();
    assert!(matches!(
        EventStore::open([&sub]),
        Err(StoreError::InvalidArgument(_))
    ));
}

#[test]
fn test_mixed_backends() {
    let dir = TempDir::new().unwrap();
    let sio = write_file(dir.path(), "a.sio", 0..2);
    let jsonl = write_file(dir.path(), "b.jsonl", 2..4);

    let mut store = EventStore::open([&sio, &jsonl]).unwrap();
    let runs: Vec<_> = store.iter().map(|e| run_of(&e.unwrap())).collect();
    assert_eq!(runs, vec![0, 1, 2, 3]);
    assert_eq!(
        store.backends(),
        vec![eventio_store::BackendKind::Sio, eventio_store::BackendKind::JsonLines]
    );
}
