//! File-backed event store with pluggable serialization backends.
//!
//! This crate provides:
//! - [`EventStore`], which validates a list of input files up front and then
//!   serves their events in path order, sequentially or by index
//! - `EventReader` / `IndexedReader` / `EventWriter` traits for backends
//! - An SIO backend (cargo feature `sio`, on by default) and a JSON-lines backend
//! - Event filtering, relation navigation and typed decoding helpers
//!
//! Inputs must be given as a collection of paths. Dynamic input
//! specifications ([`EventStore::from_spec`], [`StoreConfig`]) reject a bare
//! string instead of treating it as one path or as a sequence of characters.

#![deny(missing_docs)]

/// Backend selection and implementations.
pub mod backend;
/// Store configuration and input specifications.
pub mod config;
/// Error types for store operations.
pub mod error;
/// Event filtering API.
pub mod filter;
/// The multi-file event store.
pub mod store;
/// Reader and writer traits.
pub mod traits;
/// Typed decoding of collection items.
pub mod typed;
/// Relation navigation between records.
pub mod view;

pub use backend::{create_writer, open_reader, BackendKind};
pub use config::{Filenames, ReadMode, StoreConfig, StoreOptions, WriteOptions};
pub use error::StoreError;
pub use eventio_model::{Collection, CollectionIdTable, Event, GenericParameters, ObjectId};
pub use filter::{
    AndFilter, EventFilter, FilteredReader, HasCollectionFilter, MinItemsFilter, OrFilter,
    ParameterFilter,
};
pub use store::{EventStore, Events};
pub use traits::{EventReader, EventWriter, IndexedReader};
pub use typed::{decode_items, ParseError};
pub use view::{referencing, related};
