//! List command implementation.

use crate::commands::store_options;
use crate::output;
use eventio_store::{EventFilter, EventStore, HasCollectionFilter};

pub fn run(
    inputs: Vec<String>,
    json: bool,
    backend: Option<String>,
    permissive: bool,
    max_events: Option<u64>,
    with_collection: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = store_options(backend.as_deref(), permissive)?;
    let mut store = EventStore::open_with(&inputs, options)?;
    let filter = with_collection.map(|name| HasCollectionFilter { name });

    if !json {
        output::print_table_header();
    }

    let mut listed: u64 = 0;
    loop {
        if let Some(max) = max_events {
            if listed >= max {
                break;
            }
        }

        let index = store.position();
        let file = store.current_file_index();
        let Some(event) = store.next_event()? else {
            break;
        };
        if let Some(filter) = &filter {
            if !filter.matches(&event) {
                continue;
            }
        }

        if json {
            println!(
                "{}",
                serde_json::to_string(&output::event_summary(index, file, &event))?
            );
        } else {
            println!("{}", output::format_table_row(index, file, &event));
        }
        listed += 1;
    }

    store.close();
    Ok(())
}
