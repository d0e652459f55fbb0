//! Payload layouts of id-table and event frames.
//!
//! Id table: map-like `id -> (name, type_name)`.
//!
//! Event: four map-like parameter blocks (int, float, double, string, each
//! `key -> vec<value>`), then a collection count and per collection its id
//! and a vector of items, each item a compact JSON string.

use crate::block::{ReadDevice, WriteDevice};
use crate::errors::SioError;
use eventio_model::{
    Collection, CollectionIdTable, Event, GenericParameters, TableEntry,
};
use serde_json::Value;

/// Encodes id table entries.
pub fn encode_id_table<'a>(entries: impl IntoIterator<Item = &'a TableEntry>) -> Vec<u8> {
    let entries: Vec<&TableEntry> = entries.into_iter().collect();
    let mut device = WriteDevice::new();
    device.data(&(entries.len() as u32));
    for entry in entries {
        device.data(&entry.id);
        device.data(entry.name.as_str());
        device.data(entry.type_name.as_str());
    }
    device.into_bytes()
}

/// Decodes an id table payload.
pub fn decode_id_table(payload: &[u8]) -> Result<CollectionIdTable, SioError> {
    let mut device = ReadDevice::new(payload);
    let rows: Vec<(u32, (String, String))> = device.map_like()?;
    device.finish()?;

    let mut table = CollectionIdTable::new();
    for (id, (name, type_name)) in rows {
        table.insert(TableEntry {
            id,
            name,
            type_name,
        })?;
    }
    Ok(table)
}

/// Encodes an event payload.
pub fn encode_event(event: &Event) -> Result<Vec<u8>, SioError> {
    let mut device = WriteDevice::new();
    let params = event.parameters();
    device.map_like(&params.ints);
    device.map_like(&params.floats);
    device.map_like(&params.doubles);
    device.map_like(&params.strings);

    device.data(&(event.len() as u32));
    for collection in event.collections() {
        device.data(&collection.id());
        let items = collection
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<String>, _>>()?;
        device.data(&items);
    }
    Ok(device.into_bytes())
}

/// Decodes an event payload; collection names and types come from `table`.
pub fn decode_event(payload: &[u8], table: &CollectionIdTable) -> Result<Event, SioError> {
    let mut device = ReadDevice::new(payload);

    let parameters = GenericParameters {
        ints: device.map_like()?,
        floats: device.map_like()?,
        doubles: device.map_like()?,
        strings: device.map_like()?,
    };
    let mut event = Event::with_parameters(parameters);

    let count: u32 = device.data()?;
    for _ in 0..count {
        let id_offset = device.position();
        let id: u32 = device.data()?;
        let entry = table.entry(id).ok_or_else(|| SioError::Decode {
            offset: id_offset,
            reason: format!("collection id {} not in id table", id),
        })?;
        let raw: Vec<String> = device.data()?;
        let items = raw
            .iter()
            .map(|s| serde_json::from_str::<Value>(s))
            .collect::<Result<Vec<_>, _>>()?;
        event.insert(Collection::from_items(
            entry.name.as_str(),
            id,
            entry.type_name.as_str(),
            items,
        )?)?;
    }
    device.finish()?;
    Ok(event)
}
