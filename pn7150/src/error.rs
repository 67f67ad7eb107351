// pn7150/src/error.rs

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O failure reported by the transport. Never retried by the driver.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("operation timed out")]
    Timeout,

    #[error("malformed frame: declared {declared} payload bytes, got {actual}")]
    MalformedFrame { declared: usize, actual: usize },

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("ndef capacity exceeded: {required} bytes required, capacity is {capacity}")]
    CapacityExceeded { capacity: usize, required: usize },

    #[error("unsupported mode: {0:#04x}")]
    UnsupportedMode(u8),

    #[error("unsupported technology: {0:#04x}")]
    UnsupportedTechnology(u8),

    /// `expected`/`actual` pack the GID in the high byte and the OID in the low byte.
    #[error("unexpected response: expected {expected:#06x}, got {actual:#06x}")]
    UnexpectedResponse { expected: u16, actual: u16 },

    #[error("nci status error for gid {gid:#04x} oid {oid:#04x}: status={status:#04x}")]
    Status { gid: u8, oid: u8, status: u8 },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("remote device deactivated")]
    Deactivated,

    #[error("tag error: {0}")]
    Tag(String),

    #[error("ndef format error: {0}")]
    NdefFormat(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// True for errors that leave the controller needing re-initialization.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
