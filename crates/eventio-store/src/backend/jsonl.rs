//! JSON-lines backend: one event object per line.
//!
//! ```text
//! {"parameters": {"ints": {"run": [1]}}, "collections": [{"name": "hits", "id": 1, "type": "Hit", "items": [...]}]}
//! ```
//!
//! Blank lines are ignored. A final line without a trailing newline that does
//! not parse is a truncated write: an error in strict mode, end of input in
//! permissive mode.

use crate::config::{ReadMode, WriteOptions};
use crate::error::StoreError;
use crate::traits::{EventReader, EventWriter, IndexedReader};
use eventio_model::{CollectionIdTable, Event};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// JSON-lines reader.
#[derive(Debug)]
pub struct JsonLinesReader {
    file: File,
    path: PathBuf,
    /// Byte offset and length of every event line.
    lines: Vec<(u64, usize)>,
    table: CollectionIdTable,
    cursor: usize,
}

impl JsonLinesReader {
    /// Opens a JSON-lines file, validating every line.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let mut reader = Self {
            file,
            path,
            lines: Vec::new(),
            table: CollectionIdTable::new(),
            cursor: 0,
        };
        reader.scan(&data, mode)?;
        debug!(
            path = %reader.path.display(),
            events = reader.lines.len(),
            collections = reader.table.len(),
            "indexed JSON-lines file"
        );
        Ok(reader)
    }

    fn scan(&mut self, data: &[u8], mode: ReadMode) -> Result<(), StoreError> {
        let mut start = 0;
        let mut line_no = 0;
        while start < data.len() {
            line_no += 1;
            let (end, terminated) = match data[start..].iter().position(|b| *b == b'\n') {
                Some(i) => (start + i, true),
                None => (data.len(), false),
            };
            let line = &data[start..end];
            if !line.iter().all(u8::is_ascii_whitespace) {
                match serde_json::from_slice::<Event>(line) {
                    Ok(event) => {
                        self.table.merge(&event.id_table())?;
                        self.lines.push((start as u64, line.len()));
                    }
                    Err(e) if !terminated && mode == ReadMode::Permissive => {
                        warn!(
                            path = %self.path.display(),
                            line = line_no,
                            error = %e,
                            "truncated last line, ignoring it"
                        );
                        break;
                    }
                    Err(e) => {
                        return Err(StoreError::Other(format!(
                            "{}:{}: {}",
                            self.path.display(),
                            line_no,
                            e
                        )))
                    }
                }
            }
            start = end + 1;
        }
        Ok(())
    }
}

impl EventReader for JsonLinesReader {
    fn read_next(&mut self) -> Result<Option<Event>, StoreError> {
        if self.cursor >= self.lines.len() {
            return Ok(None);
        }
        let event = self.read_entry(self.cursor)?;
        self.cursor += 1;
        Ok(Some(event))
    }
}

impl IndexedReader for JsonLinesReader {
    fn entries(&self) -> usize {
        self.lines.len()
    }

    fn position(&self) -> usize {
        self.cursor
    }

    fn seek(&mut self, index: usize) -> Result<(), StoreError> {
        if index > self.lines.len() {
            return Err(StoreError::EventOutOfRange {
                index,
                entries: self.lines.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    fn read_entry(&mut self, index: usize) -> Result<Event, StoreError> {
        let (offset, len) = *self.lines.get(index).ok_or(StoreError::EventOutOfRange {
            index,
            entries: self.lines.len(),
        })?;
        self.file.seek(SeekFrom::Start(offset))?;
        let mut line = vec![0u8; len];
        self.file.read_exact(&mut line)?;
        Ok(serde_json::from_slice(&line)?)
    }

    fn collection_id_table(&self) -> &CollectionIdTable {
        &self.table
    }
}

/// JSON-lines writer.
pub struct JsonLinesWriter {
    file: File,
    sync: bool,
    table: CollectionIdTable,
}

impl JsonLinesWriter {
    /// Opens or creates a JSON-lines file for writing.
    ///
    /// Appending to an existing file first validates it and loads its
    /// collection ids, so later events cannot reuse an id under a new name.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let existing = match std::fs::metadata(path) {
            Ok(meta) => meta.len() > 0,
            Err(_) => false,
        };

        let mut table = CollectionIdTable::new();
        if options.append && existing {
            table = JsonLinesReader::open(path, ReadMode::Strict)?
                .collection_id_table()
                .clone();
        }

        let mut open = OpenOptions::new();
        open.create(options.create);
        if options.append {
            open.append(true);
        } else {
            open.write(true).truncate(true);
        }
        let mut file = open.open(path)?;

        if options.append && existing && !ends_with_newline(path)? {
            file.write_all(b"\n")?;
        }

        Ok(Self {
            file,
            sync: options.sync,
            table,
        })
    }
}

fn ends_with_newline(path: &Path) -> Result<bool, StoreError> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl EventWriter for JsonLinesWriter {
    fn write_event(&mut self, event: &Event) -> Result<(), StoreError> {
        let mut pending = self.table.clone();
        pending.merge(&event.id_table())?;

        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.table = pending;
        if self.sync {
            self.file.sync_data()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), StoreError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventio_model::Collection;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn make_event(n: i32) -> Event {
        let mut event = Event::new();
        let mut hits = Collection::new("hits", 1, "Hit").unwrap();
        hits.push(json!({"n": n})).unwrap();
        event.insert(hits).unwrap();
        event
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let mut writer = JsonLinesWriter::open(&path, WriteOptions::default()).unwrap();
        writer.write_event(&make_event(1)).unwrap();
        writer.write_event(&make_event(2)).unwrap();
        writer.finish().unwrap();

        let mut reader = JsonLinesReader::open(&path, ReadMode::Strict).unwrap();
        assert_eq!(reader.entries(), 2);
        assert_eq!(reader.read_entry(1).unwrap(), make_event(2));
        assert_eq!(reader.read_next().unwrap().unwrap(), make_event(1));
        assert_eq!(reader.collection_id_table().name(1), Some("hits"));
    }

    #[test]
    fn seek_moves_the_sequential_cursor() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let mut writer = JsonLinesWriter::open(&path, WriteOptions::default()).unwrap();
        for n in 0..3 {
            writer.write_event(&make_event(n)).unwrap();
        }
        writer.finish().unwrap();

        let mut reader = JsonLinesReader::open(&path, ReadMode::Strict).unwrap();
        reader.seek(2).unwrap();
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read_next().unwrap().unwrap(), make_event(2));
        assert!(reader.read_next().unwrap().is_none());

        reader.seek(0).unwrap();
        assert_eq!(reader.read_next().unwrap().unwrap(), make_event(0));
        assert_eq!(reader.position(), 1);

        reader.seek(3).unwrap();
        assert!(reader.read_next().unwrap().is_none());
        assert!(matches!(
            reader.seek(4),
            Err(StoreError::EventOutOfRange { index: 4, entries: 3 })
        ));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let line = serde_json::to_string(&make_event(3)).unwrap();
        fs::write(&path, format!("\n{}\n   \n{}\n", line, line)).unwrap();

        let reader = JsonLinesReader::open(&path, ReadMode::Strict).unwrap();
        assert_eq!(reader.entries(), 2);
    }

    #[test]
    fn truncated_last_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let line = serde_json::to_string(&make_event(3)).unwrap();
        fs::write(&path, format!("{}\n{}", line, &line[..line.len() / 2])).unwrap();

        assert!(JsonLinesReader::open(&path, ReadMode::Strict).is_err());
        let reader = JsonLinesReader::open(&path, ReadMode::Permissive).unwrap();
        assert_eq!(reader.entries(), 1);
    }

    #[test]
    fn corrupt_middle_line_is_an_error_in_both_modes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let line = serde_json::to_string(&make_event(3)).unwrap();
        fs::write(&path, format!("{}\n{{oops\n{}\n", line, line)).unwrap();

        for mode in [ReadMode::Strict, ReadMode::Permissive] {
            let err = JsonLinesReader::open(&path, mode).unwrap_err();
            assert!(err.to_string().contains(":2:"), "{err}");
        }
    }

    #[test]
    fn append_rejects_conflicting_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        {
            let mut writer = JsonLinesWriter::open(&path, WriteOptions::default()).unwrap();
            writer.write_event(&make_event(1)).unwrap();
        }
        let mut writer = JsonLinesWriter::open(&path, WriteOptions::default()).unwrap();
        let mut other = Event::new();
        other
            .insert(Collection::new("tracks", 1, "Track").unwrap())
            .unwrap();
        assert!(matches!(
            writer.write_event(&other),
            Err(StoreError::Model(_))
        ));
        writer.write_event(&make_event(2)).unwrap();

        let reader = JsonLinesReader::open(&path, ReadMode::Strict).unwrap();
        assert_eq!(reader.entries(), 2);
    }

    #[test]
    fn append_after_unterminated_line_starts_a_new_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        fs::write(&path, serde_json::to_string(&make_event(1)).unwrap()).unwrap();
        {
            let mut writer = JsonLinesWriter::open(&path, WriteOptions::default()).unwrap();
            writer.write_event(&make_event(2)).unwrap();
        }
        let reader = JsonLinesReader::open(&path, ReadMode::Strict).unwrap();
        assert_eq!(reader.entries(), 2);
    }
}
