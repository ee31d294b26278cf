//! Big-endian binary buffer utilities for labwire.
//!
//! The labwire wire format is big-endian throughout, with no padding and no
//! in-band type information, so all a codec needs is a cursor that can read
//! fixed-width quantities and counted byte runs without overrunning the
//! buffer, and a growable buffer to write them into.
//!
//! - [`Reader`] - reads binary data from a byte slice with cursor tracking;
//!   every read is fallible, since a truncated payload is an expected
//!   condition for a decoder, not a bug.
//! - [`Writer`] - writes binary data to an auto-growing buffer.
//!
//! # Example
//!
//! ```
//! use labwire_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u32(0x0203_0405);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u32().unwrap(), 0x0203_0405);
//! assert_eq!(reader.utf8(5).unwrap(), "hello");
//! assert!(reader.is_empty());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
        }
    }
}

impl std::error::Error for BufferError {}
