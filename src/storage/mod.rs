//! Storage Module
//!
//! Persistent storage layer: one flat segment file.
//!
//! ## Responsibilities
//! - Persist the memtable to disk in sorted order
//! - Resolve memtable misses with a sequential scan
//!
//! There is no index, bloom filter or block structure. A lookup that misses
//! memory costs one pass over the file.
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Record                                 │
//! │ ┌────────┬─────┬────────┬───────────┐  │
//! │ │KeyLen  │ Key │ValLen  │   Value   │  │
//! │ └────────┴─────┴────────┴───────────┘  │
//! │ ... (repeated for each entry)          │
//! └────────────────────────────────────────┘
//! ```

mod manager;
mod segment;

pub use manager::StorageManager;
pub(crate) use segment::check_component_len;
pub use segment::{
    FlushStats, SegmentIterator, SegmentWriter, MAX_COMPONENT_LEN, SEGMENT_FILENAME,
};
