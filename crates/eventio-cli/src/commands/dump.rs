//! Dump command implementation.

use crate::output;
use eventio_store::EventStore;

pub fn run(inputs: Vec<String>, index: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = EventStore::open(&inputs)?;
    let event = store.event(index)?;

    if json {
        println!("{}", output::format_json(&serde_json::to_value(&event)?));
        return Ok(());
    }

    println!("Event {} of {}", index, store.len());
    println!();
    println!("Collections:");
    for collection in event.collections() {
        println!(
            "  {} (id {}, type {}, {} items)",
            collection.name(),
            collection.id(),
            collection.type_name(),
            collection.len()
        );
        for (i, item) in collection.iter().enumerate() {
            println!("    [{}] {}", i, serde_json::to_string(item)?);
        }
    }

    println!();
    println!("Parameters:");
    let params = serde_json::to_value(event.parameters())?;
    if let Some(groups) = params.as_object() {
        for (group, values) in groups {
            if let Some(values) = values.as_object() {
                for (key, value) in values {
                    println!("  {} ({}) = {}", key, group, value);
                }
            }
        }
    }
    Ok(())
}
