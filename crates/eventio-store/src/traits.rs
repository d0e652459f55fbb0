//! Reader and writer traits implemented by every backend.

use crate::error::StoreError;
use eventio_model::{CollectionIdTable, Event};

/// Sequential source of events.
pub trait EventReader {
    /// Reads the next event, or `Ok(None)` at the end of the input.
    fn read_next(&mut self) -> Result<Option<Event>, StoreError>;
}

/// Event source with a known size and random access.
pub trait IndexedReader: EventReader {
    /// Number of events available.
    fn entries(&self) -> usize;

    /// Index of the event the next `read_next` returns.
    fn position(&self) -> usize;

    /// Moves the cursor; `index == entries()` positions at the end.
    fn seek(&mut self, index: usize) -> Result<(), StoreError>;

    /// Reads the event at `index` without moving the cursor.
    fn read_entry(&mut self, index: usize) -> Result<Event, StoreError>;

    /// Collection ids, names and types of this input.
    fn collection_id_table(&self) -> &CollectionIdTable;
}

/// Sink for events.
pub trait EventWriter {
    /// Appends one event.
    fn write_event(&mut self, event: &Event) -> Result<(), StoreError>;

    /// Flushes everything written so far.
    fn finish(&mut self) -> Result<(), StoreError>;
}
