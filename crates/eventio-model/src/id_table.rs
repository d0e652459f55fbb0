use crate::errors::ModelError;
use serde::{Deserialize, Serialize};

/// One row of a [`CollectionIdTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Collection id.
    pub id: u32,
    /// Collection name.
    pub name: String,
    /// Type name of the collection's records.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Ordered mapping between collection ids, names and record type names.
///
/// Ids are assigned sequentially starting at 1, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionIdTable {
    entries: Vec<TableEntry>,
}

impl CollectionIdTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection and returns its id.
    ///
    /// A name that is already present keeps its existing id. New ids follow
    /// the largest id in the table.
    pub fn add(&mut self, name: &str, type_name: &str) -> Result<u32, ModelError> {
        if let Some(id) = self.id(name) {
            return Ok(id);
        }
        let max = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        let id = max
            .checked_add(1)
            .ok_or(ModelError::IdSpaceExhausted(max))?;
        self.entries.push(TableEntry {
            id,
            name: name.to_string(),
            type_name: type_name.to_string(),
        });
        Ok(id)
    }

    /// Inserts an entry with a fixed id.
    ///
    /// Re-inserting an identical entry is a no-op; any disagreement on the
    /// id, name or type of an existing entry is a conflict.
    pub fn insert(&mut self, entry: TableEntry) -> Result<(), ModelError> {
        if let Some(existing) = self.entries.iter().find(|e| e.id == entry.id) {
            if *existing == entry {
                return Ok(());
            }
            return Err(ModelError::TableConflict(format!(
                "id {} maps to '{}' ({}), not '{}' ({})",
                entry.id, existing.name, existing.type_name, entry.name, entry.type_name
            )));
        }
        if let Some(existing) = self.entries.iter().find(|e| e.name == entry.name) {
            return Err(ModelError::TableConflict(format!(
                "collection '{}' already registered with id {}",
                entry.name, existing.id
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Merges all entries of `other` into this table.
    pub fn merge(&mut self, other: &CollectionIdTable) -> Result<(), ModelError> {
        for entry in &other.entries {
            self.insert(entry.clone())?;
        }
        Ok(())
    }

    /// Returns the id registered for `name`.
    pub fn id(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// Returns the name registered for `id`.
    pub fn name(&self, id: u32) -> Option<&str> {
        self.entry(id).map(|e| e.name.as_str())
    }

    /// Returns the type name registered for `id`.
    pub fn type_name(&self, id: u32) -> Option<&str> {
        self.entry(id).map(|e| e.type_name.as_str())
    }

    /// Returns the entry registered for `id`.
    pub fn entry(&self, id: u32) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.id(name).is_some()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of registered collections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no collection is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
