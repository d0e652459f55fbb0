//! Check command implementation.

use eventio_store::{EventStore, StoreError};
use serde_json::json;
use std::path::Path;

/// Opens `path` on its own and reads every event.
fn check_file(path: &Path) -> Result<usize, StoreError> {
    let mut store = EventStore::open([path])?;
    let mut count = 0;
    while store.next_event()?.is_some() {
        count += 1;
    }
    if count != store.len() {
        return Err(StoreError::Other(format!(
            "read {} events, index holds {}",
            count,
            store.len()
        )));
    }
    Ok(count)
}

pub fn run(inputs: Vec<String>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut failures = 0usize;
    let mut total = 0usize;
    let mut results = Vec::new();

    for input in &inputs {
        match check_file(Path::new(input)) {
            Ok(count) => {
                total += count;
                results.push(json!({ "file": input, "events": count, "ok": true }));
                if !json_output {
                    println!("{}: {} events OK", input, count);
                }
            }
            Err(e) => {
                failures += 1;
                results.push(json!({ "file": input, "ok": false, "error": e.to_string() }));
                if !json_output {
                    println!("{}: FAILED: {}", input, e);
                }
            }
        }
    }

    if json_output {
        let summary = json!({
            "files": results,
            "total_events": total,
            "failed": failures,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!(
            "{} files, {} events, {} failed",
            inputs.len(),
            total,
            failures
        );
    }

    if failures > 0 {
        return Err(format!("{} of {} inputs failed", failures, inputs.len()).into());
    }
    Ok(())
}
