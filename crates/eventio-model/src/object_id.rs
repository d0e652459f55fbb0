use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Address of a record: its collection id and its index inside that collection.
///
/// Two ids are equal when both the index and the collection id match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    /// Index of the object in its collection.
    pub index: i32,
    /// Id of the owning collection.
    #[serde(rename = "collectionID")]
    pub collection_id: u32,
}

impl ObjectId {
    /// Index value of an object that is not part of a collection.
    pub const UNTRACKED: i32 = -1;
    /// Index value of an invalid or unavailable object.
    pub const INVALID: i32 = -2;

    /// Creates an id for the object at `index` in collection `collection_id`.
    pub fn new(collection_id: u32, index: i32) -> Self {
        Self {
            index,
            collection_id,
        }
    }

    /// Id of an object that does not belong to any collection.
    pub fn untracked() -> Self {
        Self {
            index: Self::UNTRACKED,
            collection_id: Self::UNTRACKED as u32,
        }
    }

    /// Id of an invalid object.
    pub fn invalid() -> Self {
        Self {
            index: Self::INVALID,
            collection_id: Self::UNTRACKED as u32,
        }
    }

    /// Returns true if the id points at a slot inside a collection.
    pub fn is_tracked(&self) -> bool {
        self.index >= 0
    }

    /// Returns true unless this is the invalid sentinel.
    pub fn is_valid(&self) -> bool {
        self.index != Self::INVALID
    }

    /// Reads an id from a JSON value such as `{"index": 0, "collectionID": 3}`.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Encodes the id as a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "index": self.index, "collectionID": self.collection_id })
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::untracked()
    }
}
