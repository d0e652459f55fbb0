use thiserror::Error;

/// Errors that can occur while reading or writing SIO files.
#[derive(Error, Debug)]
pub enum SioError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, or flags).
    #[error("invalid SIO header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (reserved bytes or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: u64,
        /// Maximum allowed size.
        max: u32,
    },
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
    /// Malformed block data inside a frame payload.
    #[error("malformed block data at payload offset {offset}: {reason}")]
    Decode {
        /// Offset inside the payload.
        offset: usize,
        /// What went wrong.
        reason: String,
    },
    /// Invalid UTF-8 in a string block.
    #[error("invalid UTF-8 in string block: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Record JSON could not be encoded or parsed.
    #[error("JSON error in record: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// Decoded data violates model invariants.
    #[error("model error: {0}")]
    Model(#[from] eventio_model::ModelError),
    /// Attempted to write to a file too short to hold a header.
    #[error("file is not empty; cannot initialize header")]
    FileNotEmpty,
    /// Requested event index is past the end of the file.
    #[error("event {index} out of range ({entries} events)")]
    EventOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of events in the file.
        entries: usize,
    },
}

impl From<eventio_model::ValidationError> for SioError {
    fn from(err: eventio_model::ValidationError) -> Self {
        SioError::Model(err.into())
    }
}
