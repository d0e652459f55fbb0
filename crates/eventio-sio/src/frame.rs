//! File and frame headers, encoded with the block codec.
//!
//! ```text
//! file header   16 bytes   "ESIO" | version: u16 | flags: u16 = 0 | 8 zero bytes
//! frame header   8 bytes   kind: u8 | 3 zero bytes | payload length: u32
//! ```

use crate::block::{ReadDevice, WriteDevice};
use crate::errors::SioError;

/// File magic.
pub const MAGIC: &[u8; 4] = b"ESIO";

/// Format version written by this crate and the only one it reads.
pub const VERSION: u16 = 1;

/// Encoded size of [`FileHeader`].
pub const HEADER_SIZE: usize = 16;

/// Encoded size of [`FrameHeader`].
pub const FRAME_HEADER_SIZE: usize = 8;

/// Largest payload a single frame may carry: 16 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

const KIND_ID_TABLE: u8 = 0x01;
const KIND_EVENT: u8 = 0x02;

/// Reason text of a block decode failure inside a header.
fn block_reason(err: SioError) -> String {
    match err {
        SioError::Decode { offset, reason } => format!("byte {}: {}", offset, reason),
        other => other.to_string(),
    }
}

/// Leading header of every SIO file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version.
    pub version: u16,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self { version: VERSION }
    }
}

impl FileHeader {
    /// Encodes the header; flags and reserved bytes are always zero.
    pub fn encode(&self) -> Vec<u8> {
        let mut device = WriteDevice::new();
        device.fixed(MAGIC);
        device.data(&self.version);
        device.data(&0u16);
        device.fixed(&[0u8; 8]);
        device.into_bytes()
    }

    /// Decodes and checks a header read from the start of a file.
    pub fn decode(bytes: &[u8]) -> Result<Self, SioError> {
        let mut device = ReadDevice::new(bytes);
        let (magic, version, flags, reserved) = (|| {
            Ok::<_, SioError>((
                device.fixed::<4>()?,
                device.data::<u16>()?,
                device.data::<u16>()?,
                device.fixed::<8>()?,
            ))
        })()
        .map_err(|e| SioError::InvalidHeader(block_reason(e)))?;

        if &magic != MAGIC {
            return Err(SioError::InvalidHeader(format!(
                "not an SIO file (starts with {:02x?})",
                magic
            )));
        }
        if version != VERSION {
            return Err(SioError::InvalidHeader(format!(
                "format version {} cannot be read, only version {}",
                version, VERSION
            )));
        }
        if flags != 0 || reserved.iter().any(|b| *b != 0) {
            return Err(SioError::InvalidHeader(
                "flag and reserved fields must be zero".to_string(),
            ));
        }
        Ok(Self { version })
    }
}

/// What a frame payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Collection id table entries.
    IdTable,
    /// One encoded event.
    Event,
    /// Unknown kind; skipped by readers.
    Unknown(u8),
}

impl From<u8> for FrameKind {
    fn from(byte: u8) -> Self {
        match byte {
            KIND_ID_TABLE => FrameKind::IdTable,
            KIND_EVENT => FrameKind::Event,
            other => FrameKind::Unknown(other),
        }
    }
}

impl From<FrameKind> for u8 {
    fn from(kind: FrameKind) -> Self {
        match kind {
            FrameKind::IdTable => KIND_ID_TABLE,
            FrameKind::Event => KIND_EVENT,
            FrameKind::Unknown(byte) => byte,
        }
    }
}

/// Header in front of every frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Payload kind.
    pub kind: FrameKind,
    /// Payload length in bytes.
    pub len: u32,
}

impl FrameHeader {
    /// Describes a payload of `len` bytes, refusing payloads over [`MAX_PAYLOAD_SIZE`].
    pub fn new(kind: FrameKind, len: usize) -> Result<Self, SioError> {
        match u32::try_from(len) {
            Ok(len) if len <= MAX_PAYLOAD_SIZE => Ok(Self { kind, len }),
            _ => Err(SioError::PayloadTooLarge {
                size: len as u64,
                max: MAX_PAYLOAD_SIZE,
            }),
        }
    }

    /// Encodes the frame header.
    pub fn encode(&self) -> Vec<u8> {
        let mut device = WriteDevice::new();
        device.data(&u8::from(self.kind));
        device.fixed(&[0u8; 3]);
        device.data(&self.len);
        device.into_bytes()
    }

    /// Decodes the frame header found at file offset `offset`.
    pub fn decode(bytes: &[u8], offset: u64) -> Result<Self, SioError> {
        let invalid = |reason: String| SioError::InvalidFrame { offset, reason };

        let mut device = ReadDevice::new(bytes);
        let (kind, reserved, len) = (|| {
            Ok::<_, SioError>((
                device.data::<u8>()?,
                device.fixed::<3>()?,
                device.data::<u32>()?,
            ))
        })()
        .map_err(|e| invalid(block_reason(e)))?;

        if reserved != [0u8; 3] {
            return Err(invalid(format!("reserved bytes set: {:02x?}", reserved)));
        }
        if len > MAX_PAYLOAD_SIZE {
            return Err(invalid(format!(
                "declared payload of {} bytes is over the {} byte limit",
                len, MAX_PAYLOAD_SIZE
            )));
        }
        Ok(Self {
            kind: FrameKind::from(kind),
            len,
        })
    }

    /// Bytes the frame occupies on disk, header included.
    pub fn total_len(&self) -> u64 {
        FRAME_HEADER_SIZE as u64 + u64::from(self.len)
    }
}
