//! MemTable Module
//!
//! In-memory ordered store for writes that have not been flushed yet.
//!
//! ## Responsibilities
//! - Fast reads and writes in memory, callable from many threads at once
//! - Ascending byte-wise key order (required for segment generation)
//! - Live range cursors that tolerate concurrent mutation
//! - Track approximate size
//!
//! ## Data Structure Choice
//! A lock-free `crossbeam_skiplist::SkipMap`: callers never take a lock,
//! and lookups by bound (`lower_bound`) let range cursors re-seek after
//! every step instead of pinning a snapshot.

mod iterator;
mod table;

use bytes::Bytes;

pub use iterator::RangeIter;
pub use table::MemTable;

/// An immutable key/value pair
///
/// Keys order byte-wise (unsigned, shorter first on a shared prefix), which
/// is the natural ordering of `[u8]`. Values may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    key: Bytes,
    value: Bytes,
}

impl Entry {
    /// Create an entry from anything convertible to `Bytes`
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Consume the entry, returning `(key, value)`
    pub fn into_parts(self) -> (Bytes, Bytes) {
        (self.key, self.value)
    }

    /// Bytes of key and value held in memory
    pub(crate) fn footprint(&self) -> usize {
        self.key.len() + self.value.len()
    }
}
