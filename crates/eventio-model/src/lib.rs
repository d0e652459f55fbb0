//! Data model primitives for stored events.
//!
//! An [`Event`] groups named [`Collection`]s of schema-less records together
//! with per-event [`GenericParameters`]. Records inside an event address each
//! other through [`ObjectId`]s, and every input file carries a
//! [`CollectionIdTable`] mapping collection ids to names and type names.
//!
#![deny(missing_docs)]

/// Collections of records.
pub mod collection;
/// Error types for model operations.
pub mod errors;
/// Events as sets of named collections.
pub mod event;
/// Collection id to name/type lookup table.
pub mod id_table;
/// Validated identifiers.
pub mod identifiers;
/// Object addressing within an event.
pub mod object_id;
/// Typed per-event parameters.
pub mod parameters;
/// Validation helpers used by model types.
pub mod validation;

pub use collection::Collection;
pub use errors::ModelError;
pub use event::Event;
pub use id_table::{CollectionIdTable, TableEntry};
pub use identifiers::CollectionName;
pub use object_id::ObjectId;
pub use parameters::{GenericParameters, ParameterValue};
pub use validation::ValidationError;
