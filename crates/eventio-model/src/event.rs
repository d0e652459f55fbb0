use crate::collection::Collection;
use crate::errors::ModelError;
use crate::id_table::{CollectionIdTable, TableEntry};
use crate::object_id::ObjectId;
use crate::parameters::GenericParameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One event: named collections plus generic parameters.
///
/// Collection names and ids are unique within an event. Collections keep
/// their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRepr")]
pub struct Event {
    parameters: GenericParameters,
    collections: Vec<Collection>,
}

#[derive(Deserialize)]
struct EventRepr {
    #[serde(default)]
    parameters: GenericParameters,
    #[serde(default)]
    collections: Vec<Collection>,
}

impl TryFrom<EventRepr> for Event {
    type Error = ModelError;

    fn try_from(repr: EventRepr) -> Result<Self, Self::Error> {
        let mut event = Event::with_parameters(repr.parameters);
        for collection in repr.collections {
            event.insert(collection)?;
        }
        Ok(event)
    }
}

impl Event {
    /// Creates an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an event with the given parameters and no collections.
    pub fn with_parameters(parameters: GenericParameters) -> Self {
        Self {
            parameters,
            collections: Vec::new(),
        }
    }

    /// Adds a collection.
    pub fn insert(&mut self, collection: Collection) -> Result<(), ModelError> {
        if self.contains(collection.name()) {
            return Err(ModelError::DuplicateCollection(collection.name().to_string()));
        }
        if self.get_by_id(collection.id()).is_some() {
            return Err(ModelError::DuplicateId(collection.id()));
        }
        self.collections.push(collection);
        Ok(())
    }

    /// Collection named `name`.
    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name() == name)
    }

    /// Mutable access to the collection named `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.name() == name)
    }

    /// Collection with id `id`.
    pub fn get_by_id(&self, id: u32) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id() == id)
    }

    /// Returns true if a collection named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Collection names in insertion order.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(Collection::name)
    }

    /// Collections in insertion order.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Looks up the record addressed by `id`.
    pub fn resolve(&self, id: &ObjectId) -> Option<&Value> {
        if !id.is_tracked() {
            return None;
        }
        self.get_by_id(id.collection_id)?.get(id.index as usize)
    }

    /// Builds the id table describing this event's collections.
    pub fn id_table(&self) -> CollectionIdTable {
        let mut table = CollectionIdTable::new();
        for collection in &self.collections {
            let inserted = table.insert(TableEntry {
                id: collection.id(),
                name: collection.name().to_string(),
                type_name: collection.type_name().to_string(),
            });
            debug_assert!(inserted.is_ok(), "event collections have unique names and ids");
        }
        table
    }

    /// Event parameters.
    pub fn parameters(&self) -> &GenericParameters {
        &self.parameters
    }

    /// Mutable event parameters.
    pub fn parameters_mut(&mut self) -> &mut GenericParameters {
        &mut self.parameters
    }

    /// Empties every collection but keeps them registered.
    pub fn clear_collections(&mut self) {
        for collection in &mut self.collections {
            collection.clear();
        }
    }

    /// Drops all collections and parameters.
    pub fn clear(&mut self) {
        self.collections.clear();
        self.parameters.clear();
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Returns true if the event has no collections.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
