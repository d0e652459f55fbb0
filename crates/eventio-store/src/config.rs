//! Store configuration and input specifications.

use crate::backend::BackendKind;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Read mode for handling truncated inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// Strict mode: truncated inputs are errors.
    #[default]
    Strict,
    /// Permissive mode: truncation is treated as end-of-file.
    Permissive,
}

/// Options applied to every input of an [`EventStore`](crate::EventStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Backend used for every input; detected per file extension when `None`.
    pub backend: Option<BackendKind>,
    /// Truncation handling.
    pub read_mode: ReadMode,
}

/// Options for backend writers.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each event (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
    /// Whether to append to an existing file (default: true).
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
            append: true,
        }
    }
}

/// An ordered, non-empty list of input paths.
///
/// Deserialization checks the shape of the value before looking at any
/// element: a single string is rejected rather than read as one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilenamesRepr", into = "Vec<PathBuf>")]
pub struct Filenames(Vec<PathBuf>);

#[derive(Deserialize)]
#[serde(untagged)]
enum FilenamesRepr {
    Single(String),
    Many(Vec<PathBuf>),
    Other(Value),
}

impl TryFrom<FilenamesRepr> for Filenames {
    type Error = String;

    fn try_from(repr: FilenamesRepr) -> Result<Self, Self::Error> {
        match repr {
            FilenamesRepr::Single(s) => Err(format!(
                "filenames must be a sequence of paths, not the single string '{}'",
                s
            )),
            FilenamesRepr::Many(paths) => Filenames::new(paths),
            FilenamesRepr::Other(value) => Err(format!(
                "filenames must be a sequence of path strings, got {}",
                describe(&value)
            )),
        }
    }
}

impl From<Filenames> for Vec<PathBuf> {
    fn from(value: Filenames) -> Self {
        value.0
    }
}

impl Filenames {
    /// Builds a list from already typed paths; fails when `paths` is empty.
    pub fn new<I, P>(paths: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err("at least one input file is required".to_string());
        }
        Ok(Self(paths))
    }

    /// Parses a dynamic input specification.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        serde_json::from_value(value.clone())
            .map_err(|e| StoreError::InvalidArgument(e.to_string()))
    }

    /// The paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array with non-string entries",
        Value::Object(_) => "an object",
    }
}

/// Serializable store configuration.
///
/// ```json
/// { "filenames": ["run1.sio", "run2.sio"], "backend": "sio", "read_mode": "strict" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Input files, read in order.
    pub filenames: Filenames,
    /// Backend override; detected per file extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendKind>,
    /// Truncation handling.
    #[serde(default)]
    pub read_mode: ReadMode,
}

impl StoreConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, StoreError> {
        serde_json::from_str(text).map_err(|e| StoreError::InvalidArgument(e.to_string()))
    }

    /// Parses a configuration from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        serde_json::from_value(value.clone())
            .map_err(|e| StoreError::InvalidArgument(e.to_string()))
    }

    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Store options described by this configuration.
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            backend: self.backend,
            read_mode: self.read_mode,
        }
    }
}
