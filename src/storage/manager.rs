//! Storage Manager
//!
//! Owns the segment file and coordinates reads and rewrites of it.
//!
//! ## Responsibilities
//! - Resolve the segment path once from the data directory
//! - Rewrite the segment from a MemTable snapshot on flush
//! - Scan the segment for keys missing from memory
//! - Keep scans from observing a segment mid-rewrite

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{KvError, Result};
use crate::memtable::{Entry, MemTable};

use super::segment::{FlushStats, SegmentIterator, SegmentWriter, SEGMENT_FILENAME};

/// Manages the single on-disk segment
///
/// ## Concurrency:
/// - `file_lock`: shared for scans, exclusive while a flush rewrites the file
/// - No file handle outlives the call that opened it
pub struct StorageManager {
    /// `{data_dir}/dao_data.txt`, fixed for the lifetime of the manager
    segment_path: PathBuf,

    /// Guards the segment file, not any in-memory state
    file_lock: RwLock<()>,
}

impl StorageManager {
    /// Create a manager for the segment inside `data_dir`
    ///
    /// Touches nothing on disk; the segment appears on first flush.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            segment_path: data_dir.join(SEGMENT_FILENAME),
            file_lock: RwLock::new(()),
        }
    }

    /// Look up `key` by scanning the segment from the start
    ///
    /// Returns:
    /// - `Ok(Some(entry))` — key found
    /// - `Ok(None)` — no segment yet, or key absent from it
    /// - `Err(CorruptSegment)` — a record was cut short
    pub fn search(&self, key: &[u8]) -> Result<Option<Entry>> {
        let _guard = self.file_lock.read();

        let mut records = match self.open_segment()? {
            Some(records) => records,
            None => {
                tracing::debug!("no segment yet, key not found");
                return Ok(None);
            }
        };

        match records.search(key) {
            Ok(found) => {
                tracing::debug!(hit = found.is_some(), "segment scan finished");
                Ok(found)
            }
            Err(e) => {
                if let KvError::CorruptSegment { .. } = e {
                    tracing::warn!(path = %self.segment_path.display(), "{}", e);
                }
                Err(e)
            }
        }
    }

    /// Rewrite the segment with every entry in `memtable`, in key order
    ///
    /// Does not clear the memtable; the caller does that once this returns
    /// `Ok`. An empty memtable produces an empty segment.
    pub fn flush(&self, memtable: &MemTable) -> Result<FlushStats> {
        let _guard = self.file_lock.write();

        let mut writer = SegmentWriter::create(&self.segment_path)?;
        for entry in memtable.iter() {
            writer.add(&entry)?;
        }
        writer.finish()
    }

    /// Read every record in the segment, in file order
    ///
    /// Returns an empty list when no segment exists.
    pub fn read_all(&self) -> Result<Vec<Entry>> {
        let _guard = self.file_lock.read();

        match self.open_segment()? {
            Some(records) => records.collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Whether a segment has been written
    pub fn segment_exists(&self) -> bool {
        self.segment_path.is_file()
    }

    /// Get the segment file path
    pub fn segment_path(&self) -> &Path {
        &self.segment_path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Open the segment for sequential reading; `None` if it does not exist
    fn open_segment(&self) -> Result<Option<SegmentIterator<BufReader<File>>>> {
        match File::open(&self.segment_path) {
            Ok(file) => Ok(Some(SegmentIterator::new(BufReader::new(file)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
