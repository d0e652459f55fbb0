#![allow(dead_code)]

use eventio_model::{Collection, Event, ObjectId};
use eventio_store::{create_writer, BackendKind, WriteOptions};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Event with `run` as parameter, one particle and `n_hits` hits pointing at it.
pub fn make_event(run: i32, n_hits: usize) -> Event {
    let mut event = Event::new();
    let mut particles = Collection::new("MCParticles", 1, "MCParticle").unwrap();
    particles
        .push(json!({"pdg": 13, "energy": 50.0, "daughters": []}))
        .unwrap();

    let mut hits = Collection::new("hits", 2, "SimTrackerHit").unwrap();
    for i in 0..n_hits {
        hits.push(json!({
            "cellID": i,
            "edep": 0.25,
            "mcParticle": ObjectId::new(1, 0).to_value()
        }))
        .unwrap();
    }
    event.insert(particles).unwrap();
    event.insert(hits).unwrap();
    event.parameters_mut().set("run", vec![run]);
    event
        .parameters_mut()
        .set("generator", vec!["pythia".to_string()]);
    event
}

/// Writes events for runs `runs` into `dir/name`, picking the backend by extension.
pub fn write_file(dir: &Path, name: &str, runs: std::ops::Range<i32>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let kind = BackendKind::from_path(&path).unwrap();
    let mut writer = create_writer(&path, kind, WriteOptions::default()).unwrap();
    for run in runs {
        writer.write_event(&make_event(run, run as usize % 4)).unwrap();
    }
    writer.finish().unwrap();
    path
}

pub fn run_of(event: &Event) -> i32 {
    *event.parameters().get_one::<i32>("run").unwrap()
}
