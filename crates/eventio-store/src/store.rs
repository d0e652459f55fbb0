//! The multi-file event store.

use crate::backend::{open_reader, BackendKind};
use crate::config::{Filenames, StoreConfig, StoreOptions};
use crate::error::StoreError;
use crate::traits::{EventReader, IndexedReader};
use eventio_model::{CollectionIdTable, Event};
use serde_json::Value;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

struct Input {
    path: PathBuf,
    backend: BackendKind,
    /// Global index of this input's first event.
    first: usize,
    entries: usize,
}

/// Read access to the events of one or more input files.
///
/// Construction validates every input before anything is read: the input
/// list must be a non-empty collection of paths, and each path must be an
/// existing, readable file of a supported backend. Any violation fails the
/// whole construction with [`StoreError::InvalidArgument`]; no partially
/// opened store is returned.
///
/// Events are numbered globally in path order: all events of the first
/// input, then those of the second, and so on.
///
/// # Example
///
/// ```rust,no_run
/// use eventio_store::EventStore;
///
/// let mut store = EventStore::open(["sio_io/example.sio"])?;
/// println!("{} events", store.len());
/// while let Some(event) = store.next_event()? {
///     for name in event.collection_names() {
///         println!("{name}");
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EventStore {
    inputs: Vec<Input>,
    /// Open readers, parallel to `inputs`; empty once closed.
    readers: Vec<Box<dyn IndexedReader + Send>>,
    total: usize,
    cursor: usize,
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("filenames", &self.filenames())
            .field("total", &self.total)
            .field("cursor", &self.cursor)
            .field("open", &self.is_open())
            .finish()
    }
}

impl EventStore {
    /// Opens the given inputs, detecting each backend from its file extension.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if the list is empty, or if any
    /// path is missing, not a regular file, unreadable, has no known backend,
    /// or cannot be opened by its backend.
    pub fn open<I, P>(filenames: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::open_with(filenames, StoreOptions::default())
    }

    /// Opens the given inputs with explicit options.
    pub fn open_with<I, P>(filenames: I, options: StoreOptions) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let names = Filenames::new(filenames.into_iter().map(|p| p.as_ref().to_path_buf()))
            .map_err(StoreError::InvalidArgument)?;

        let mut inputs = Vec::with_capacity(names.paths().len());
        let mut readers = Vec::with_capacity(names.paths().len());
        let mut total = 0;
        for path in names.paths() {
            let (backend, reader) = open_input(path, &options)?;
            let entries = reader.entries();
            debug!(path = %path.display(), %backend, entries, "opened input");
            inputs.push(Input {
                path: path.clone(),
                backend,
                first: total,
                entries,
            });
            readers.push(reader);
            total += entries;
        }

        info!(files = inputs.len(), events = total, "opened event store");
        Ok(Self {
            inputs,
            readers,
            total,
            cursor: 0,
        })
    }

    /// Opens a store from a dynamic input specification.
    ///
    /// Accepts an array of path strings, or an object in [`StoreConfig`]
    /// form. Any other shape, in particular a single string, is rejected
    /// with [`StoreError::InvalidArgument`] before it is looked at as paths.
    pub fn from_spec(spec: &Value) -> Result<Self, StoreError> {
        match spec {
            Value::Object(_) => Self::from_config(StoreConfig::from_value(spec)?),
            _ => Self::open(Filenames::from_value(spec)?.paths()),
        }
    }

    /// Opens a store described by `config`.
    pub fn from_config(config: StoreConfig) -> Result<Self, StoreError> {
        let options = config.options();
        Self::open_with(config.filenames.paths(), options)
    }

    /// Total number of events across all inputs.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Returns true if no input holds any event.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Input paths in read order.
    pub fn filenames(&self) -> Vec<&Path> {
        self.inputs.iter().map(|i| i.path.as_path()).collect()
    }

    /// Backend used for each input, in read order.
    pub fn backends(&self) -> Vec<BackendKind> {
        self.inputs.iter().map(|i| i.backend).collect()
    }

    /// Number of events in each input, in read order.
    pub fn entries_per_file(&self) -> Vec<usize> {
        self.inputs.iter().map(|i| i.entries).collect()
    }

    /// Global index of the next event returned by [`EventStore::next_event`].
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Index of the input holding the cursor; `None` at the end or once closed.
    pub fn current_file_index(&self) -> Option<usize> {
        if !self.is_open() {
            return None;
        }
        self.locate(self.cursor).map(|(file, _)| file)
    }

    /// Collection id table of the input holding the cursor.
    pub fn collection_id_table(&self) -> Option<&CollectionIdTable> {
        let file = self.current_file_index()?;
        Some(self.readers[file].collection_id_table())
    }

    /// Returns true until [`EventStore::close`] is called.
    pub fn is_open(&self) -> bool {
        !self.readers.is_empty()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StoreError::Closed)
        }
    }

    /// Maps a global event index to (input, local index).
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.total {
            return None;
        }
        let file = self
            .inputs
            .partition_point(|input| input.first + input.entries <= index);
        Some((file, index - self.inputs[file].first))
    }

    /// Reads the event at global `index` without moving the cursor.
    pub fn event(&mut self, index: usize) -> Result<Event, StoreError> {
        self.ensure_open()?;
        let (file, local) = self.locate(index).ok_or(StoreError::EventOutOfRange {
            index,
            entries: self.total,
        })?;
        self.readers[file].read_entry(local)
    }

    /// Reads the event at the cursor and advances it; `Ok(None)` at the end.
    ///
    /// Reads go through the sequential cursor of the input holding the event.
    pub fn next_event(&mut self) -> Result<Option<Event>, StoreError> {
        self.ensure_open()?;
        let Some((file, local)) = self.locate(self.cursor) else {
            return Ok(None);
        };
        let reader = &mut self.readers[file];
        if reader.position() != local {
            reader.seek(local)?;
        }
        let event = reader.read_next()?.ok_or_else(|| {
            StoreError::Other(format!(
                "{}: event {} listed in the index but not readable",
                self.inputs[file].path.display(),
                local
            ))
        })?;
        self.cursor += 1;
        Ok(Some(event))
    }

    /// Moves the cursor to global `index`; `index == len()` positions at the end.
    pub fn goto(&mut self, index: usize) -> Result<(), StoreError> {
        self.ensure_open()?;
        if index > self.total {
            return Err(StoreError::InvalidArgument(format!(
                "event index {} out of range ({} events)",
                index, self.total
            )));
        }
        if let Some((file, local)) = self.locate(index) {
            self.readers[file].seek(local)?;
        }
        self.cursor = index;
        Ok(())
    }

    /// Moves the cursor back to the first event.
    pub fn rewind(&mut self) -> Result<(), StoreError> {
        self.goto(0)
    }

    /// Iterates the events from the cursor to the end.
    pub fn iter(&mut self) -> Events<'_> {
        Events {
            store: self,
            done: false,
        }
    }

    /// Releases every open file handle. Later reads fail with [`StoreError::Closed`].
    pub fn close(&mut self) {
        if self.is_open() {
            self.readers.clear();
            info!(files = self.inputs.len(), "closed event store");
        }
    }
}

impl EventReader for EventStore {
    fn read_next(&mut self) -> Result<Option<Event>, StoreError> {
        self.next_event()
    }
}

/// Iterator over the remaining events of an [`EventStore`].
///
/// Yields each read error once and then stops.
pub struct Events<'a> {
    store: &'a mut EventStore,
    done: bool,
}

impl Iterator for Events<'_> {
    type Item = Result<Event, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.store.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.len().saturating_sub(self.store.position());
        (0, Some(remaining))
    }
}

/// Validates one input path and opens it with its backend.
fn open_input(
    path: &Path,
    options: &StoreOptions,
) -> Result<(BackendKind, Box<dyn IndexedReader + Send>), StoreError> {
    let invalid = |reason: String| {
        StoreError::InvalidArgument(format!("{}: {}", path.display(), reason))
    };

    let metadata = fs::metadata(path)
        .map_err(|e| invalid(format!("file does not exist or is not accessible ({})", e)))?;
    if !metadata.is_file() {
        return Err(invalid("not a regular file".to_string()));
    }
    File::open(path).map_err(|e| invalid(format!("file is not readable ({})", e)))?;

    let backend = match options.backend {
        Some(kind) => kind,
        None => BackendKind::from_path(path)
            .ok_or_else(|| invalid("cannot determine backend from file extension".to_string()))?,
    };
    if !backend.is_available() {
        return Err(invalid(format!(
            "the {} backend is not available in this build",
            backend
        )));
    }

    let reader = open_reader(path, backend, options.read_mode)
        .map_err(|e| invalid(format!("cannot open as {} input: {}", backend, e)))?;
    Ok((backend, reader))
}
