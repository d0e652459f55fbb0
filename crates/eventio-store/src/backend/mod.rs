//! Backend selection.
//!
//! Backends form a closed set. A backend is picked per input from the file
//! extension unless the caller names one explicitly.

use crate::config::{ReadMode, WriteOptions};
use crate::error::StoreError;
use crate::traits::{EventWriter, IndexedReader};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// JSON-lines backend.
pub mod jsonl;
/// SIO backend.
#[cfg(feature = "sio")]
pub mod sio;

/// Supported serialization backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// Framed binary SIO files (`.sio`).
    #[serde(rename = "sio")]
    Sio,
    /// One JSON event per line (`.jsonl`, `.ndjson`).
    #[serde(rename = "jsonl", alias = "json-lines", alias = "ndjson")]
    JsonLines,
}

impl BackendKind {
    /// Detects the backend from the file extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "sio" => Some(BackendKind::Sio),
            "jsonl" | "ndjson" => Some(BackendKind::JsonLines),
            _ => None,
        }
    }

    /// Short name of the backend.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Sio => "sio",
            BackendKind::JsonLines => "jsonl",
        }
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            BackendKind::Sio => "sio",
            BackendKind::JsonLines => "jsonl",
        }
    }

    /// Returns true if the backend was compiled into this build.
    pub fn is_available(self) -> bool {
        match self {
            BackendKind::Sio => cfg!(feature = "sio"),
            BackendKind::JsonLines => true,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sio" => Ok(BackendKind::Sio),
            "jsonl" | "json-lines" | "ndjson" => Ok(BackendKind::JsonLines),
            other => Err(StoreError::InvalidArgument(format!(
                "unknown backend '{}' (expected 'sio' or 'jsonl')",
                other
            ))),
        }
    }
}

fn unavailable(kind: BackendKind) -> StoreError {
    StoreError::InvalidArgument(format!(
        "the {} backend is not available in this build",
        kind
    ))
}

/// Opens `path` for reading with the given backend.
pub fn open_reader(
    path: &Path,
    kind: BackendKind,
    mode: ReadMode,
) -> Result<Box<dyn IndexedReader + Send>, StoreError> {
    match kind {
        #[cfg(feature = "sio")]
        BackendKind::Sio => Ok(Box::new(sio::SioBackendReader::open(path, mode)?)),
        BackendKind::JsonLines => Ok(Box::new(jsonl::JsonLinesReader::open(path, mode)?)),
        #[allow(unreachable_patterns)]
        _ => Err(unavailable(kind)),
    }
}

/// Opens `path` for writing with the given backend.
pub fn create_writer(
    path: &Path,
    kind: BackendKind,
    options: WriteOptions,
) -> Result<Box<dyn EventWriter + Send>, StoreError> {
    match kind {
        #[cfg(feature = "sio")]
        BackendKind::Sio => Ok(Box::new(sio::SioBackendWriter::open(path, options)?)),
        BackendKind::JsonLines => Ok(Box::new(jsonl::JsonLinesWriter::open(path, options)?)),
        #[allow(unreachable_patterns)]
        _ => Err(unavailable(kind)),
    }
}
