//! Segment Module
//!
//! The single on-disk file holding the most recently flushed memtable.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Record (repeated, ascending key order, no duplicates)   │
//! │   KeyLen: i32 BE (4) | Key | ValLen: i32 BE (4) | Value │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! No header, footer, checksum or version tag. A record boundary can only
//! be found by decoding from the start of the file.

mod iterator;
mod writer;

use crate::error::{KvError, Result};

pub use iterator::SegmentIterator;
pub use writer::{FlushStats, SegmentWriter};

// =============================================================================
// Shared Constants (used by writer and iterator)
// =============================================================================

/// File name of the segment inside the data directory
pub const SEGMENT_FILENAME: &str = "dao_data.txt";

/// Size of each length prefix
pub(crate) const LEN_PREFIX_SIZE: usize = 4;

/// Largest key or value an i32 length prefix can describe
pub const MAX_COMPONENT_LEN: usize = i32::MAX as usize;

/// Validate a key or value length against the i32 prefix, returning the prefix
pub(crate) fn check_component_len(kind: &str, len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        KvError::InvalidArgument(format!(
            "{} of {} bytes exceeds the {} byte limit",
            kind, len, MAX_COMPONENT_LEN
        ))
    })
}
