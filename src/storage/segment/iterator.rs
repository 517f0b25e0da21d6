//! Segment Iterator
//!
//! Sequential decoding of segment records from the start of the file.

use std::io::{self, Read};

use bytes::Bytes;

use crate::error::{KvError, Result};
use crate::memtable::Entry;

use super::LEN_PREFIX_SIZE;

/// Iterator over segment records in file order
///
/// Ends cleanly when the input is exhausted exactly where a record would
/// start. Anything shorter than a declared length is reported once as
/// `CorruptSegment`, after which the iterator is fused.
pub struct SegmentIterator<R> {
    reader: R,
    /// Bytes consumed so far
    offset: u64,
    done: bool,
}

impl<R: Read> SegmentIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            done: false,
        }
    }

    /// Scan forward for `key`, stopping at the first match
    pub fn search(&mut self, key: &[u8]) -> Result<Option<Entry>> {
        for record in self.by_ref() {
            let (found, value) = record?.into_parts();
            if found.as_ref() == key {
                return Ok(Some(Entry::new(Bytes::copy_from_slice(key), value)));
            }
        }
        Ok(None)
    }

    /// Decode one record; `Ok(None)` on clean end of input
    fn read_record(&mut self) -> Result<Option<Entry>> {
        let record_start = self.offset;

        let key_len = match self.read_len_prefix()? {
            (0, _) => return Ok(None),
            (n, _) if n < LEN_PREFIX_SIZE => {
                return Err(KvError::corrupt(
                    record_start,
                    format!("key length prefix truncated after {} bytes", n),
                ));
            }
            (_, len) => self.check_len(record_start, "key", len)?,
        };
        let key = self.read_payload(record_start, "key", key_len)?;

        let value_len = match self.read_len_prefix()? {
            (n, _) if n < LEN_PREFIX_SIZE => {
                return Err(KvError::corrupt(
                    record_start,
                    format!("value length prefix truncated after {} bytes", n),
                ));
            }
            (_, len) => self.check_len(record_start, "value", len)?,
        };
        let value = self.read_payload(record_start, "value", value_len)?;

        Ok(Some(Entry::new(key, value)))
    }

    /// Read a 4-byte prefix, returning how many bytes were available
    fn read_len_prefix(&mut self) -> Result<(usize, i32)> {
        let mut buf = [0u8; LEN_PREFIX_SIZE];
        let n = read_full(&mut self.reader, &mut buf)?;
        self.offset += n as u64;
        Ok((n, i32::from_be_bytes(buf)))
    }

    fn check_len(&self, record_start: u64, component: &str, len: i32) -> Result<usize> {
        usize::try_from(len).map_err(|_| {
            KvError::corrupt(
                record_start,
                format!("negative {} length {}", component, len),
            )
        })
    }

    fn read_payload(&mut self, record_start: u64, component: &str, len: usize) -> Result<Vec<u8>> {
        // take() keeps a bogus length from forcing a huge allocation up front
        let mut buf = Vec::new();
        let n = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        self.offset += n as u64;

        if n < len {
            return Err(KvError::corrupt(
                record_start,
                format!("{} declares {} bytes but only {} remain", component, len, n),
            ));
        }
        Ok(buf)
    }
}

impl<R: Read> Iterator for SegmentIterator<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_record() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the input allows, returning the byte count
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
