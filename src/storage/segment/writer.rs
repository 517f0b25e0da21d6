//! Segment Writer
//!
//! Writes sorted entries to the segment file, replacing whatever was there.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::memtable::Entry;

use super::{check_component_len, LEN_PREFIX_SIZE};

/// Summary of a completed flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Records written
    pub entries: u64,
    /// Bytes written, length prefixes included
    pub bytes: u64,
}

/// Streams records into a freshly truncated segment file
pub struct SegmentWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    stats: FlushStats,
}

impl SegmentWriter {
    /// Create (or truncate) the segment at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            stats: FlushStats::default(),
        })
    }

    /// Append one record (must be called in ascending key order)
    pub fn add(&mut self, entry: &Entry) -> Result<()> {
        self.write_component(entry.key())?;
        self.write_component(entry.value())?;
        self.stats.entries += 1;
        Ok(())
    }

    /// Flush buffers, sync the file and return what was written
    pub fn finish(self) -> Result<FlushStats> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        tracing::debug!(
            path = %self.path.display(),
            entries = self.stats.entries,
            bytes = self.stats.bytes,
            "segment written"
        );
        Ok(self.stats)
    }

    fn write_component(&mut self, bytes: &[u8]) -> Result<()> {
        let len = check_component_len("component", bytes.len())?;

        self.writer.write_all(&len.to_be_bytes())?;
        self.writer.write_all(bytes)?;
        self.stats.bytes += (LEN_PREFIX_SIZE + bytes.len()) as u64;
        Ok(())
    }
}
