//! Relation navigation between records of one event.
//!
//! A record refers to another through a field holding an
//! [`ObjectId`] (one-to-one) or an array of them (one-to-many).

use eventio_model::{Event, ObjectId};
use serde_json::Value;

/// Resolves the records that `item`'s `field` points to.
///
/// Ids that are untracked or point outside the event are skipped. A missing
/// field yields an empty list.
pub fn related<'e>(event: &'e Event, item: &Value, field: &str) -> Vec<&'e Value> {
    let ids: Vec<ObjectId> = match item.get(field) {
        Some(Value::Array(values)) => values.iter().filter_map(ObjectId::from_value).collect(),
        Some(value) => ObjectId::from_value(value).into_iter().collect(),
        None => Vec::new(),
    };
    ids.iter().filter_map(|id| event.resolve(id)).collect()
}

/// Collects the items of `collection` whose `field` refers to `target`.
///
/// Performs a full scan of the collection.
pub fn referencing<'e>(
    event: &'e Event,
    collection: &str,
    field: &str,
    target: &ObjectId,
) -> Vec<&'e Value> {
    let Some(collection) = event.get(collection) else {
        return Vec::new();
    };
    collection
        .iter()
        .filter(|item| match item.get(field) {
            Some(Value::Array(values)) => values
                .iter()
                .any(|v| ObjectId::from_value(v).as_ref() == Some(target)),
            Some(value) => ObjectId::from_value(value).as_ref() == Some(target),
            None => false,
        })
        .collect()
}
