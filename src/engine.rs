//! Engine Module
//!
//! The store's public surface, composing the MemTable and the segment.
//!
//! ## Responsibilities
//! - Route point lookups: memory first, segment on a miss
//! - Serve range scans from memory
//! - Validate and apply upserts
//! - Flush memory to the segment, clearing memory only after success

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::memtable::{Entry, MemTable, RangeIter};
use crate::storage::{check_component_len, FlushStats, StorageManager};

/// The main storage engine
///
/// ## Concurrency Model
///
/// - **Writes** (upsert): lock-free inserts into the MemTable skip list
/// - **Reads** (get/range): lock-free at the MemTable level; segment scans
///   share a read lock with each other
/// - **Flush**: holds the segment lock exclusively while rewriting the file,
///   then clears the MemTable
///
/// Flushes are not coordinated with concurrent upserts. An upsert that
/// lands after the segment is written but before the MemTable is cleared
/// is dropped; callers that need every write persisted must serialize
/// flushes against writers themselves.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// In-memory table for unflushed writes
    memtable: MemTable,

    /// The single on-disk segment
    storage: StorageManager,
}

impl Engine {
    /// Open an engine over the given config
    ///
    /// On startup:
    /// 1. Validate the config
    /// 2. Create the data directory if requested
    /// 3. Resolve the segment path (the file itself may not exist yet)
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        if config.create_dir {
            fs::create_dir_all(&config.data_dir)?;
        }

        let storage = StorageManager::new(&config.data_dir);

        tracing::info!(
            segment = %storage.segment_path().display(),
            existing = storage.segment_exists(),
            "engine opened"
        );

        Ok(Self {
            config,
            memtable: MemTable::new(),
            storage,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// Get the entry for `key`
    ///
    /// Search order:
    /// 1. MemTable (unflushed writes shadow the segment)
    /// 2. Segment, scanned from the start
    pub fn get(&self, key: &[u8]) -> Result<Option<Entry>> {
        if let Some(entry) = self.memtable.get(key) {
            return Ok(Some(entry));
        }
        self.storage.search(key)
    }

    /// Entries with key in `[from, to)`, from memory only
    ///
    /// A `None` bound is open-ended. Flushed entries are not visited.
    pub fn range(&self, from: Option<&[u8]>, to: Option<&[u8]>) -> RangeIter<'_> {
        self.memtable.range(from, to)
    }

    /// Every in-memory entry
    pub fn all(&self) -> RangeIter<'_> {
        self.range(None, None)
    }

    /// In-memory entries with key `>= from`
    pub fn all_from(&self, from: &[u8]) -> RangeIter<'_> {
        self.range(Some(from), None)
    }

    /// In-memory entries with key `< to`
    pub fn all_to(&self, to: &[u8]) -> RangeIter<'_> {
        self.range(None, Some(to))
    }

    /// Insert or overwrite an entry
    ///
    /// Rejects keys and values too long for the segment's i32 length
    /// prefixes before anything is written.
    pub fn upsert(&self, entry: Entry) -> Result<()> {
        check_component_len("key", entry.key().len())?;
        check_component_len("value", entry.value().len())?;

        self.memtable.put(entry);
        Ok(())
    }

    /// Flush the MemTable to the segment, replacing its previous contents
    pub fn flush(&self) -> Result<()> {
        self.flush_with_stats().map(|_| ())
    }

    /// Flush and report what was written
    ///
    /// The MemTable is cleared only when the segment write succeeds.
    pub fn flush_with_stats(&self) -> Result<FlushStats> {
        let stats = match self.storage.flush(&self.memtable) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(
                    segment = %self.storage.segment_path().display(),
                    "flush failed, memtable kept: {}",
                    e
                );
                return Err(e);
            }
        };

        self.memtable.clear();

        tracing::info!(
            entries = stats.entries,
            bytes = stats.bytes,
            "memtable flushed"
        );
        Ok(stats)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Read the whole segment in file order
    pub fn segment_entries(&self) -> Result<Vec<Entry>> {
        self.storage.read_all()
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the segment file path
    pub fn segment_path(&self) -> &Path {
        self.storage.segment_path()
    }

    /// Whether a segment has been written
    pub fn segment_exists(&self) -> bool {
        self.storage.segment_exists()
    }

    /// Get the memtable entry count
    pub fn memtable_len(&self) -> usize {
        self.memtable.len()
    }

    /// Get the current memtable size
    pub fn memtable_size(&self) -> usize {
        self.memtable.size()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
