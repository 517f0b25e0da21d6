//! MemTable implementation
//!
//! SkipMap-based memtable, safe for concurrent readers and writers.

use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use crossbeam_skiplist::SkipMap;

use super::{Entry, RangeIter};

/// In-memory table for writes not yet flushed
///
/// ## Concurrency:
/// - `data`: lock-free skip list, all methods take `&self`
/// - `size`: approximate, updated without coordinating with `data`. Racing
///   overwrites of one key can each count or subtract the same old entry,
///   so `size()` may drift either way until the next `clear()`; it never
///   goes below zero.
pub struct MemTable {
    /// Key → entry, ascending key order
    data: SkipMap<Bytes, Entry>,
    /// Approximate bytes of keys and values held
    size: AtomicUsize,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self {
            data: SkipMap::new(),
            size: AtomicUsize::new(0),
        }
    }

    /// Get the entry held for `key`
    ///
    /// `None` only means the key is not in memory; the segment may still
    /// hold it.
    pub fn get(&self, key: &[u8]) -> Option<Entry> {
        self.data.get(key).map(|e| e.value().clone())
    }

    /// Insert or overwrite the entry at `entry.key()`
    ///
    /// Returns the approximate memtable size after the write. Exact when
    /// no other thread overwrites the same key concurrently.
    pub fn put(&self, entry: Entry) -> usize {
        let added = entry.footprint();
        let replaced = self
            .data
            .get(entry.key().as_ref())
            .map(|e| e.value().footprint())
            .unwrap_or(0);

        self.data.insert(entry.key().clone(), entry);

        let grown = self.size.fetch_add(added, Ordering::Relaxed) + added;
        if replaced == 0 {
            return grown;
        }

        // Overwrites racing each other can drive a plain fetch_sub below zero
        let prev = self
            .size
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
                Some(s.saturating_sub(replaced))
            })
            .unwrap_or(0);
        prev.saturating_sub(replaced)
    }

    /// Entries with key in `[from, to)`; a missing bound is open-ended
    ///
    /// The returned cursor is live: it observes writes made while it is
    /// being consumed and never fails because of them.
    pub fn range(&self, from: Option<&[u8]>, to: Option<&[u8]>) -> RangeIter<'_> {
        if self.data.is_empty() {
            return RangeIter::exhausted(&self.data);
        }
        RangeIter::new(&self.data, from, to)
    }

    /// Live cursor over every entry in ascending key order
    pub fn iter(&self) -> RangeIter<'_> {
        self.range(None, None)
    }

    /// Get approximate size in bytes
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Get entry count
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Remove every entry (after a successful flush)
    pub fn clear(&self) {
        self.data.clear();
        self.size.store(0, Ordering::Relaxed);
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_overwrite_adjusts_size() {
        let memtable = MemTable::new();

        memtable.put(Entry::new("key", "long-value"));
        let size = memtable.put(Entry::new("key", "v"));

        assert_eq!(size, 4);
        assert_eq!(memtable.size(), 4);
        assert_eq!(memtable.len(), 1);
    }

    #[test]
    fn test_racing_overwrites_keep_size_sane() {
        let memtable = Arc::new(MemTable::new());
        let mut handles = Vec::new();

        for t in 0..4 {
            let memtable = Arc::clone(&memtable);
            handles.push(thread::spawn(move || {
                for i in 0..500 {
                    memtable.put(Entry::new("shared", vec![t as u8; i % 8]));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(memtable.len(), 1);
        memtable.clear();
        assert_eq!(memtable.size(), 0);

        // Bookkeeping is exact again once writers are quiet
        memtable.put(Entry::new("shared", "1234"));
        assert_eq!(memtable.size(), 10);
    }

    #[test]
    fn test_clear_resets_size() {
        let memtable = MemTable::new();
        memtable.put(Entry::new("a", "1"));
        memtable.put(Entry::new("b", "2"));

        memtable.clear();

        assert!(memtable.is_empty());
        assert_eq!(memtable.size(), 0);
        assert_eq!(memtable.get(b"a"), None);
    }
}
