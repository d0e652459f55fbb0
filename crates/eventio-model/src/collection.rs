use crate::identifiers::CollectionName;
use crate::object_id::ObjectId;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which each record carries its own [`ObjectId`].
pub const OBJECT_ID_KEY: &str = "objectID";

/// Named, id-tagged list of records sharing one type name.
///
/// Records are JSON objects. Every record pushed into a collection gets an
/// `objectID` entry pointing at its own slot, unless it already has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CollectionRepr")]
pub struct Collection {
    name: CollectionName,
    id: u32,
    #[serde(rename = "type")]
    type_name: String,
    items: Vec<Value>,
}

#[derive(Deserialize)]
struct CollectionRepr {
    name: CollectionName,
    id: u32,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    items: Vec<Value>,
}

impl TryFrom<CollectionRepr> for Collection {
    type Error = ValidationError;

    fn try_from(repr: CollectionRepr) -> Result<Self, Self::Error> {
        let mut collection = Collection {
            name: repr.name,
            id: repr.id,
            type_name: repr.type_name,
            items: Vec::with_capacity(repr.items.len()),
        };
        for item in repr.items {
            collection.push(item)?;
        }
        Ok(collection)
    }
}

impl Collection {
    /// Creates an empty collection.
    pub fn new(
        name: impl Into<String>,
        id: u32,
        type_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: CollectionName::parse(name)?,
            id,
            type_name: type_name.into(),
            items: Vec::new(),
        })
    }

    /// Creates a collection holding `items`.
    pub fn from_items(
        name: impl Into<String>,
        id: u32,
        type_name: impl Into<String>,
        items: Vec<Value>,
    ) -> Result<Self, ValidationError> {
        let mut collection = Self::new(name, id, type_name)?;
        collection.items.reserve(items.len());
        for item in items {
            collection.push(item)?;
        }
        Ok(collection)
    }

    /// Appends a record and returns its [`ObjectId`].
    pub fn push(&mut self, mut item: Value) -> Result<ObjectId, ValidationError> {
        let index = self.items.len();
        let object_id = ObjectId::new(self.id, index as i32);
        let Some(obj) = item.as_object_mut() else {
            return Err(ValidationError::NotAnObject {
                collection: self.name.to_string(),
                index,
            });
        };
        obj.entry(OBJECT_ID_KEY)
            .or_insert_with(|| object_id.to_value());
        self.items.push(item);
        Ok(object_id)
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Collection id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Type name of the records.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Records in insertion order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Iterates the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection has no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all records, keeping name, id and type.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consumes the collection, returning its records.
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl std::ops::Index<usize> for Collection {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}
