//! SIO file reader.

use crate::errors::SioError;
use crate::frame::{FileHeader, FrameHeader, FrameKind, FRAME_HEADER_SIZE, HEADER_SIZE};
use crate::record::{decode_event, decode_id_table};
use eventio_model::{CollectionIdTable, Event};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read mode for handling truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Strict mode: truncated frames are errors.
    #[default]
    Strict,
    /// Permissive mode: truncation is treated as end-of-file.
    Permissive,
}

/// Reader over the events of one SIO file.
///
/// Opening the file validates the header and scans every frame header once.
/// Id-table frames are decoded and merged during the scan; event frames are
/// only indexed, so [`SioReader::entries`] is known up front and events can
/// be read in any order.
///
/// # Example
///
/// ```rust,no_run
/// use eventio_sio::{ReadMode, SioReader};
///
/// let mut reader = SioReader::open("events.sio", ReadMode::Strict)?;
/// let last = reader.read_event(reader.entries() - 1)?;
/// println!("{:?}", last.collection_names().collect::<Vec<_>>());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct SioReader {
    file: File,
    path: PathBuf,
    mode: ReadMode,
    table: CollectionIdTable,
    index: Vec<u64>,
    cursor: usize,
}

impl SioReader {
    /// Opens an SIO file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`SioError`] if:
    /// - File cannot be opened
    /// - File header is invalid
    /// - A frame header is malformed or an id table frame cannot be decoded
    /// - The file is truncated and `mode` is [`ReadMode::Strict`]
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, SioError> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;
        Self::read_header(&mut file)?;

        let mut reader = Self {
            file,
            path,
            mode,
            table: CollectionIdTable::new(),
            index: Vec::new(),
            cursor: 0,
        };
        reader.scan()?;
        debug!(
            path = %reader.path.display(),
            events = reader.index.len(),
            collections = reader.table.len(),
            "indexed SIO file"
        );
        Ok(reader)
    }

    fn read_header(file: &mut File) -> Result<FileHeader, SioError> {
        file.seek(SeekFrom::Start(0))?;
        let mut header_bytes = [0u8; HEADER_SIZE];
        match file.read_exact(&mut header_bytes) {
            Ok(()) => FileHeader::decode(&header_bytes),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(SioError::InvalidHeader(
                "file too short to hold a header".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn scan(&mut self) -> Result<(), SioError> {
        let file_size = self.file.metadata()?.len();
        let mut position = HEADER_SIZE as u64;

        while position < file_size {
            if file_size - position < FRAME_HEADER_SIZE as u64 {
                return self.truncated(position);
            }
            let frame = self.frame_at(position)?;
            if position + frame.total_len() > file_size {
                return self.truncated(position);
            }

            match frame.kind {
                FrameKind::IdTable => {
                    let payload = self.payload(&frame)?;
                    self.table.merge(&decode_id_table(&payload)?)?;
                }
                FrameKind::Event => self.index.push(position),
                FrameKind::Unknown(kind) => {
                    debug!(offset = position, kind, "skipping unknown frame kind");
                }
            }
            position += frame.total_len();
        }
        Ok(())
    }

    fn truncated(&self, offset: u64) -> Result<(), SioError> {
        match self.mode {
            ReadMode::Strict => Err(SioError::TruncatedFrame { offset }),
            ReadMode::Permissive => {
                warn!(
                    path = %self.path.display(),
                    offset,
                    "truncated frame, ignoring the rest of the file"
                );
                Ok(())
            }
        }
    }

    fn frame_at(&mut self, offset: u64) -> Result<FrameHeader, SioError> {
        self.file.seek(SeekFrom::Start(offset))?;
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        self.file.read_exact(&mut bytes)?;
        FrameHeader::decode(&bytes, offset)
    }

    /// Reads the payload of the frame whose header was just read.
    fn payload(&mut self, frame: &FrameHeader) -> Result<Vec<u8>, SioError> {
        let mut payload = vec![0u8; frame.len as usize];
        self.file.read_exact(&mut payload)?;
        Ok(payload)
    }

    /// Number of complete events in the file.
    pub fn entries(&self) -> usize {
        self.index.len()
    }

    /// Merged collection id table of the file.
    pub fn collection_id_table(&self) -> &CollectionIdTable {
        &self.table
    }

    /// Path the reader was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the next event returned by [`SioReader::read_next`].
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the sequential cursor; `index == entries()` positions at the end.
    pub fn seek(&mut self, index: usize) -> Result<(), SioError> {
        if index > self.entries() {
            return Err(SioError::EventOutOfRange {
                index,
                entries: self.entries(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    /// Reads the event at `index` without moving the cursor.
    pub fn read_event(&mut self, index: usize) -> Result<Event, SioError> {
        let offset = *self.index.get(index).ok_or(SioError::EventOutOfRange {
            index,
            entries: self.index.len(),
        })?;
        let frame = self.frame_at(offset)?;
        let payload = self.payload(&frame)?;
        decode_event(&payload, &self.table)
    }

    /// Reads the event at the cursor and advances it.
    ///
    /// Returns `Ok(None)` once every event has been read.
    pub fn read_next(&mut self) -> Result<Option<Event>, SioError> {
        if self.cursor >= self.entries() {
            return Ok(None);
        }
        let event = self.read_event(self.cursor)?;
        self.cursor += 1;
        Ok(Some(event))
    }
}
