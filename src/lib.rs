//! # segkv
//!
//! A minimal persistent key-value store with:
//! - A lock-free, ordered in-memory table for writes
//! - A single on-disk segment written by explicit flushes
//! - Point lookups that fall back from memory to a scan of the segment
//! - Live range scans over memory
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Engine                               │
//! │           get / range / upsert / flush  (&self)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐   flush   ┌─────────────┐
//!   │  MemTable   │ ────────▶ │   Segment   │
//!   │  (SkipMap)  │           │ dao_data.txt│
//!   └─────────────┘  on miss  └─────────────┘
//!          get  ─────────────────────▶ scan
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod memtable;
pub mod storage;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::Config;
pub use engine::Engine;
pub use memtable::Entry;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of segkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
