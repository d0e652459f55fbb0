//! Framed SIO binary format for event files.
//!
//! This crate provides:
//! - A 16-byte file header followed by length-prefixed record frames
//! - A block codec for the payloads (collection id tables and events)
//! - [`SioReader`] with strict and permissive truncation handling and
//!   random access through a frame index built at open time
//! - [`SioWriter`] that appends events and the id table entries they need
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventio_model::{Collection, Event};
//! use eventio_sio::{ReadMode, SioReader, SioWriter, WriteOptions};
//! use serde_json::json;
//!
//! let mut event = Event::new();
//! let mut hits = Collection::new("hits", 1, "SimHit")?;
//! hits.push(json!({"energy": 1.25}))?;
//! event.insert(hits)?;
//!
//! let mut writer = SioWriter::open("events.sio", WriteOptions::default())?;
//! writer.write_event(&event)?;
//! writer.finish()?;
//!
//! let mut reader = SioReader::open("events.sio", ReadMode::Strict)?;
//! assert_eq!(reader.entries(), 1);
//! while let Some(event) = reader.read_next()? {
//!     println!("{} collections", event.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Primitive block encoding used inside frame payloads.
pub mod block;
/// Error types for SIO operations.
pub mod errors;
/// File header and record frame structures.
pub mod frame;
/// SIO file reader.
pub mod reader;
/// Payload encoding of id tables and events.
pub mod record;
/// SIO file writer.
pub mod writer;

pub use errors::SioError;
pub use frame::{FileHeader, FrameHeader, FrameKind};
pub use reader::{ReadMode, SioReader};
pub use writer::{SioWriter, WriteOptions};
