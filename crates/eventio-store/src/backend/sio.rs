//! SIO backend: adapts `eventio-sio` readers and writers to the store traits.

use crate::config::{ReadMode, WriteOptions};
use crate::error::StoreError;
use crate::traits::{EventReader, EventWriter, IndexedReader};
use eventio_model::{CollectionIdTable, Event};
use eventio_sio::{SioReader, SioWriter};
use std::path::Path;

impl From<ReadMode> for eventio_sio::ReadMode {
    fn from(mode: ReadMode) -> Self {
        match mode {
            ReadMode::Strict => eventio_sio::ReadMode::Strict,
            ReadMode::Permissive => eventio_sio::ReadMode::Permissive,
        }
    }
}

impl From<WriteOptions> for eventio_sio::WriteOptions {
    fn from(options: WriteOptions) -> Self {
        eventio_sio::WriteOptions {
            sync: options.sync,
            create: options.create,
            append: options.append,
        }
    }
}

/// SIO-backed reader.
#[derive(Debug)]
pub struct SioBackendReader {
    inner: SioReader,
}

impl SioBackendReader {
    /// Opens an SIO file.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, StoreError> {
        Ok(Self {
            inner: SioReader::open(path, mode.into())?,
        })
    }
}

impl EventReader for SioBackendReader {
    fn read_next(&mut self) -> Result<Option<Event>, StoreError> {
        Ok(self.inner.read_next()?)
    }
}

impl IndexedReader for SioBackendReader {
    fn entries(&self) -> usize {
        self.inner.entries()
    }

    fn position(&self) -> usize {
        self.inner.position()
    }

    fn seek(&mut self, index: usize) -> Result<(), StoreError> {
        Ok(self.inner.seek(index)?)
    }

    fn read_entry(&mut self, index: usize) -> Result<Event, StoreError> {
        Ok(self.inner.read_event(index)?)
    }

    fn collection_id_table(&self) -> &CollectionIdTable {
        self.inner.collection_id_table()
    }
}

/// SIO-backed writer.
pub struct SioBackendWriter {
    inner: SioWriter,
}

impl SioBackendWriter {
    /// Opens or creates an SIO file for writing.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        Ok(Self {
            inner: SioWriter::open(path, options.into())?,
        })
    }
}

impl EventWriter for SioBackendWriter {
    fn write_event(&mut self, event: &Event) -> Result<(), StoreError> {
        Ok(self.inner.write_event(event)?)
    }

    fn finish(&mut self) -> Result<(), StoreError> {
        Ok(self.inner.flush()?)
    }
}
