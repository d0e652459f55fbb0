//! Output formatting utilities.

use eventio_model::Event;
use serde_json::{json, Value};

/// Formats a value as pretty-printed JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// One-line JSON summary of an event for `list --json`.
pub fn event_summary(index: usize, file: Option<usize>, event: &Event) -> Value {
    let collections: Vec<Value> = event
        .collections()
        .iter()
        .map(|c| json!({ "name": c.name(), "id": c.id(), "type": c.type_name(), "size": c.len() }))
        .collect();
    json!({
        "index": index,
        "file": file,
        "parameters": event.parameters().len(),
        "collections": collections,
    })
}

/// Formats an event as a table row.
pub fn format_table_row(index: usize, file: Option<usize>, event: &Event) -> String {
    let file = file.map(|f| f.to_string()).unwrap_or_else(|| "?".to_string());
    let names: Vec<&str> = event.collection_names().collect();
    format!(
        "{:<8} {:<6} {:<12} {:<10} {}",
        index,
        file,
        event.len(),
        event.parameters().len(),
        truncate(&names.join(","), 60)
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<8} {:<6} {:<12} {:<10} {}",
        "EVENT", "FILE", "COLLECTIONS", "PARAMS", "NAMES"
    );
    println!("{}", "-".repeat(80));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
