//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Malformed construction input, missing or unreadable file, or an
    /// unsupported backend.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// SIO backend error.
    #[cfg(feature = "sio")]
    #[error("SIO error: {0}")]
    Sio(#[from] eventio_sio::SioError),
    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Event data violates model invariants.
    #[error("model error: {0}")]
    Model(#[from] eventio_model::ModelError),
    /// Typed decoding of collection items failed.
    #[error("parse error: {0}")]
    Parse(#[from] crate::typed::ParseError),
    /// Requested event index is past the end of the input.
    #[error("event {index} out of range ({entries} events)")]
    EventOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available events.
        entries: usize,
    },
    /// The store was closed.
    #[error("event store is closed")]
    Closed,
    /// Other error.
    #[error("{0}")]
    Other(String),
}
