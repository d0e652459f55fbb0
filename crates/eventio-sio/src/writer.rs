//! SIO file writer.

use crate::errors::SioError;
use crate::frame::{FileHeader, FrameHeader, FrameKind, HEADER_SIZE};
use crate::reader::{ReadMode, SioReader};
use crate::record::{encode_event, encode_id_table};
use eventio_model::{CollectionIdTable, Event, ModelError, TableEntry};
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Options for SIO writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each frame (default: false).
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

/// Appending writer for SIO files.
///
/// Before the first event that uses a collection id, the writer emits an
/// id-table frame carrying the entries not written yet. An id that was already
/// written under a different name or type is rejected.
pub struct SioWriter {
    file: File,
    sync: bool,
    table: CollectionIdTable,
    events_written: usize,
}

impl SioWriter {
    /// Opens or creates an SIO file for writing.
    ///
    /// An empty (or new) file gets a header. An existing file must be a valid
    /// SIO file; it is appended to when `options.append` is `true`, otherwise
    /// truncated back to its header.
    ///
    /// # Errors
    ///
    /// Returns [`SioError`] if:
    /// - File cannot be opened/created
    /// - Existing file is not a valid SIO file
    /// - File is not empty but too small to be valid
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, SioError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(options.create)
            .write(true)
            .read(true)
            .open(path)?;

        let mut writer = Self {
            file,
            sync: options.sync,
            table: CollectionIdTable::new(),
            events_written: 0,
        };

        let len = writer.file.metadata()?.len();
        if len == 0 {
            writer.write_header()?;
        } else if len < HEADER_SIZE as u64 {
            return Err(SioError::FileNotEmpty);
        } else if options.append {
            let existing = SioReader::open(path, ReadMode::Strict)?;
            writer.table = existing.collection_id_table().clone();
            writer.file.seek(io::SeekFrom::End(0))?;
        } else {
            // Validate before discarding the old frames.
            SioReader::open(path, ReadMode::Permissive)?;
            writer.file.set_len(HEADER_SIZE as u64)?;
            writer.file.seek(io::SeekFrom::Start(HEADER_SIZE as u64))?;
        }

        Ok(writer)
    }

    fn write_header(&mut self) -> Result<(), SioError> {
        self.file.write_all(&FileHeader::default().encode())?;
        self.flush()
    }

    /// Flushes buffered data, syncing to disk when `sync` is set.
    pub fn flush(&mut self) -> Result<(), SioError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }

    /// Appends one event, preceded by an id-table frame when it introduces
    /// new collections.
    pub fn write_event(&mut self, event: &Event) -> Result<(), SioError> {
        let mut fresh: Vec<TableEntry> = Vec::new();
        for entry in event.id_table().iter() {
            match self.table.entry(entry.id) {
                Some(known) if known == entry => {}
                Some(known) => {
                    return Err(ModelError::TableConflict(format!(
                        "id {} already written as '{}' ({})",
                        known.id, known.name, known.type_name
                    ))
                    .into())
                }
                None => fresh.push(entry.clone()),
            }
        }

        let payload = encode_event(event)?;
        if !fresh.is_empty() {
            let mut pending = self.table.clone();
            for entry in &fresh {
                pending.insert(entry.clone())?;
            }
            debug!(count = fresh.len(), "writing collection id table entries");
            self.append_raw(FrameKind::IdTable, &encode_id_table(&fresh))?;
            self.table = pending;
        }
        self.append_raw(FrameKind::Event, &payload)?;
        self.events_written += 1;
        Ok(())
    }

    /// Appends a raw frame with the given kind and payload.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), SioError> {
        let frame = FrameHeader::new(kind, payload.len())?;
        self.file.write_all(&frame.encode())?;
        self.file.write_all(payload)?;
        self.flush()
    }

    /// Collection ids written to the file so far.
    pub fn collection_id_table(&self) -> &CollectionIdTable {
        &self.table
    }

    /// Number of events written through this writer.
    pub fn events_written(&self) -> usize {
        self.events_written
    }

    /// Flushes and closes the file.
    pub fn finish(mut self) -> Result<(), SioError> {
        self.flush()
    }
}

impl Drop for SioWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
