//! Typed decoding of collection items.

use eventio_model::Collection;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error that can occur when decoding items into a typed representation.
#[derive(Error, Debug)]
pub enum ParseError {
    /// An item did not match the requested type.
    #[error("item {index} of collection '{collection}': {source}")]
    Deserialize {
        /// Collection name.
        collection: String,
        /// Item index.
        index: usize,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

/// Deserializes every item of `collection` into `T`.
///
/// Fields of the item that `T` does not name (including `objectID`) are
/// ignored unless `T` denies unknown fields.
pub fn decode_items<T: DeserializeOwned>(collection: &Collection) -> Result<Vec<T>, ParseError> {
    collection
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|source| ParseError::Deserialize {
                collection: collection.name().to_string(),
                index,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventio_model::ObjectId;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Hit {
        #[serde(rename = "cellID")]
        cell_id: u64,
        energy: f32,
        #[serde(rename = "objectID")]
        object_id: ObjectId,
    }

    #[test]
    fn decodes_matching_items() {
        let mut hits = Collection::new("hits", 4, "Hit").unwrap();
        hits.push(json!({"cellID": 7, "energy": 0.5})).unwrap();
        let decoded: Vec<Hit> = decode_items(&hits).unwrap();
        assert_eq!(
            decoded,
            vec![Hit {
                cell_id: 7,
                energy: 0.5,
                object_id: ObjectId::new(4, 0),
            }]
        );
    }

    #[test]
    fn reports_offending_item() {
        let mut hits = Collection::new("hits", 4, "Hit").unwrap();
        hits.push(json!({"cellID": 7, "energy": 0.5})).unwrap();
        hits.push(json!({"cellID": "seven"})).unwrap();
        let err = decode_items::<Hit>(&hits).unwrap_err();
        let ParseError::Deserialize { index, collection, .. } = err;
        assert_eq!(index, 1);
        assert_eq!(collection, "hits");
    }
}
