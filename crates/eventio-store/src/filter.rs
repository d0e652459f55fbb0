//! Event filtering API for selective event iteration.

use crate::error::StoreError;
use crate::traits::EventReader;
use eventio_model::Event;

/// Trait for filtering events during iteration.
pub trait EventFilter {
    /// Returns true if the event matches the filter criteria.
    fn matches(&self, event: &Event) -> bool;
}

/// Matches events holding a collection with the given name.
#[derive(Debug, Clone)]
pub struct HasCollectionFilter {
    /// Collection name to look for.
    pub name: String,
}

impl EventFilter for HasCollectionFilter {
    fn matches(&self, event: &Event) -> bool {
        event.contains(&self.name)
    }
}

/// Matches events whose integer parameter `key` contains `value`.
#[derive(Debug, Clone)]
pub struct ParameterFilter {
    /// Parameter key.
    pub key: String,
    /// Value that must be present.
    pub value: i32,
}

impl EventFilter for ParameterFilter {
    fn matches(&self, event: &Event) -> bool {
        event
            .parameters()
            .get::<i32>(&self.key)
            .map(|values| values.contains(&self.value))
            .unwrap_or(false)
    }
}

/// Matches events where the named collection holds at least `min` items.
#[derive(Debug, Clone)]
pub struct MinItemsFilter {
    /// Collection name.
    pub collection: String,
    /// Minimum number of items.
    pub min: usize,
}

impl EventFilter for MinItemsFilter {
    fn matches(&self, event: &Event) -> bool {
        event
            .get(&self.collection)
            .map(|c| c.len() >= self.min)
            .unwrap_or(false)
    }
}

/// Composite filter: all filters must match (AND).
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn EventFilter>>,
}

impl EventFilter for AndFilter {
    fn matches(&self, event: &Event) -> bool {
        self.filters.iter().all(|f| f.matches(event))
    }
}

/// Composite filter: any filter must match (OR).
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn EventFilter>>,
}

impl EventFilter for OrFilter {
    fn matches(&self, event: &Event) -> bool {
        self.filters.iter().any(|f| f.matches(event))
    }
}

/// Reader that filters events from an underlying reader.
#[derive(Debug)]
pub struct FilteredReader<R: EventReader, F: EventFilter> {
    reader: R,
    filter: F,
}

impl<R: EventReader, F: EventFilter> FilteredReader<R, F> {
    /// Creates a new filtered reader.
    pub fn new(reader: R, filter: F) -> Self {
        Self { reader, filter }
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: EventReader, F: EventFilter> EventReader for FilteredReader<R, F> {
    fn read_next(&mut self) -> Result<Option<Event>, StoreError> {
        loop {
            match self.reader.read_next()? {
                None => return Ok(None),
                Some(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Some(_) => continue,
            }
        }
    }
}
