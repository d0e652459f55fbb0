use eventio_model::{Collection, Event, ObjectId};
use eventio_sio::{ReadMode, SioError, SioReader, SioWriter, WriteOptions};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn make_event(run: i32, n_hits: usize) -> Event {
    let mut event = Event::new();
    let mut particles = Collection::new("MCParticles", 1, "MCParticle").unwrap();
    particles.push(json!({"pdg": 13, "energy": 10.0})).unwrap();

    let mut hits = Collection::new("hits", 2, "SimTrackerHit").unwrap();
    for i in 0..n_hits {
        hits.push(json!({"cellID": i, "mcParticle": ObjectId::new(1, 0).to_value()}))
            .unwrap();
    }
    event.insert(particles).unwrap();
    event.insert(hits).unwrap();
    event.parameters_mut().set("run", vec![run]);
    event
}

#[test]
fn test_write_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");

    {
        let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
        writer.write_event(&make_event(1, 2)).unwrap();
        writer.write_event(&make_event(2, 3)).unwrap();
        assert_eq!(writer.events_written(), 2);
        writer.finish().unwrap();
    }

    let mut reader = SioReader::open(&path, ReadMode::Strict).unwrap();
    assert_eq!(reader.entries(), 2);
    let first = reader.read_next().unwrap().unwrap();
    let second = reader.read_next().unwrap().unwrap();
    assert!(reader.read_next().unwrap().is_none());

    assert_eq!(first, make_event(1, 2));
    assert_eq!(second.get("hits").unwrap().len(), 3);
    assert_eq!(second.parameters().get_one::<i32>("run"), Some(&2));
}

#[test]
fn test_random_access_matches_sequential() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");
    {
        let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
        for run in 0..5 {
            writer.write_event(&make_event(run, run as usize)).unwrap();
        }
    }

    let mut reader = SioReader::open(&path, ReadMode::Strict).unwrap();
    let third = reader.read_event(3).unwrap();
    assert_eq!(reader.position(), 0);
    reader.seek(3).unwrap();
    assert_eq!(reader.read_next().unwrap().unwrap(), third);
    assert_eq!(reader.position(), 4);

    assert!(matches!(
        reader.read_event(5),
        Err(SioError::EventOutOfRange { index: 5, entries: 5 })
    ));
    assert!(reader.seek(6).is_err());
    reader.seek(5).unwrap();
    assert!(reader.read_next().unwrap().is_none());
}

#[test]
fn test_append_to_existing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");

    {
        let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
        writer.write_event(&make_event(1, 1)).unwrap();
        writer.finish().unwrap();
    }
    let size_after_first = fs::metadata(&path).unwrap().len();
    {
        let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
        assert_eq!(writer.collection_id_table().len(), 2);
        writer.write_event(&make_event(2, 1)).unwrap();
        writer.finish().unwrap();
    }
    // The second event reuses known ids, so no new table frame was needed:
    // exactly one more event frame of the same size as before.
    let mut reader = SioReader::open(&path, ReadMode::Strict).unwrap();
    assert_eq!(reader.entries(), 2);
    assert_eq!(reader.read_event(1).unwrap().parameters().get_one::<i32>("run"), Some(&2));
    assert!(fs::metadata(&path).unwrap().len() > size_after_first);
}

#[test]
fn test_truncate_when_not_appending() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");
    {
        let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
        writer.write_event(&make_event(1, 1)).unwrap();
        writer.write_event(&make_event(2, 1)).unwrap();
    }
    {
        let options = WriteOptions {
            append: false,
            ..WriteOptions::default()
        };
        let mut writer = SioWriter::open(&path, options).unwrap();
        writer.write_event(&make_event(9, 1)).unwrap();
    }
    let mut reader = SioReader::open(&path, ReadMode::Strict).unwrap();
    assert_eq!(reader.entries(), 1);
    assert_eq!(reader.read_event(0).unwrap().parameters().get_one::<i32>("run"), Some(&9));
}

#[test]
fn test_new_collections_extend_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");
    {
        let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
        writer.write_event(&make_event(1, 1)).unwrap();
        let mut event = make_event(2, 1);
        event
            .insert(Collection::new("tracks", 3, "Track").unwrap())
            .unwrap();
        writer.write_event(&event).unwrap();
    }
    let mut reader = SioReader::open(&path, ReadMode::Strict).unwrap();
    let table = reader.collection_id_table();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["MCParticles", "hits", "tracks"]);
    assert!(reader.read_event(1).unwrap().contains("tracks"));
    assert!(!reader.read_event(0).unwrap().contains("tracks"));
}

#[test]
fn test_conflicting_ids_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");
    let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
    writer.write_event(&make_event(1, 1)).unwrap();

    let mut renamed = Event::new();
    renamed
        .insert(Collection::new("other", 1, "MCParticle").unwrap())
        .unwrap();
    assert!(matches!(
        writer.write_event(&renamed),
        Err(SioError::Model(_))
    ));
}

#[test]
fn test_empty_file_creates_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");
    fs::File::create(&path).unwrap();

    {
        let mut writer = SioWriter::open(&path, WriteOptions::default()).unwrap();
        writer.write_event(&make_event(1, 1)).unwrap();
    }
    assert!(fs::metadata(&path).unwrap().len() > 16);
    let reader = SioReader::open(&path, ReadMode::Strict).unwrap();
    assert_eq!(reader.entries(), 1);
}

#[test]
fn test_header_only_file_has_no_events() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.sio");
    SioWriter::open(&path, WriteOptions::default())
        .unwrap()
        .finish()
        .unwrap();

    let mut reader = SioReader::open(&path, ReadMode::Strict).unwrap();
    assert_eq!(reader.entries(), 0);
    assert!(reader.collection_id_table().is_empty());
    assert!(reader.read_next().unwrap().is_none());
}
