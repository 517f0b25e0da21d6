//! MemTable range cursor
//!
//! Walks the skip list by re-seeking from a watermark on every step, so no
//! view of the map is pinned between calls to `next()`.

use std::ops::Bound;

use bytes::Bytes;
use crossbeam_skiplist::SkipMap;

use super::Entry;

/// Lazy, live iterator over `[from, to)` in ascending key order
pub struct RangeIter<'a> {
    data: &'a SkipMap<Bytes, Entry>,
    /// Included(from) before the first step, Excluded(last key) after
    watermark: Bound<Bytes>,
    /// Exclusive upper bound
    upper: Option<Bytes>,
    done: bool,
}

impl<'a> RangeIter<'a> {
    pub(super) fn new(
        data: &'a SkipMap<Bytes, Entry>,
        from: Option<&[u8]>,
        to: Option<&[u8]>,
    ) -> Self {
        let watermark = match from {
            Some(k) => Bound::Included(Bytes::copy_from_slice(k)),
            None => Bound::Unbounded,
        };
        Self {
            data,
            watermark,
            upper: to.map(Bytes::copy_from_slice),
            done: false,
        }
    }

    /// A cursor that yields nothing
    pub(super) fn exhausted(data: &'a SkipMap<Bytes, Entry>) -> Self {
        Self {
            data,
            watermark: Bound::Unbounded,
            upper: None,
            done: true,
        }
    }
}

impl Iterator for RangeIter<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let bound: Bound<&[u8]> = match &self.watermark {
            Bound::Included(k) => Bound::Included(k.as_ref()),
            Bound::Excluded(k) => Bound::Excluded(k.as_ref()),
            Bound::Unbounded => Bound::Unbounded,
        };

        let found = match self.data.lower_bound(bound) {
            Some(e) => e,
            None => {
                self.done = true;
                return None;
            }
        };

        if let Some(upper) = &self.upper {
            if found.key().as_ref() >= upper.as_ref() {
                self.done = true;
                return None;
            }
        }

        self.watermark = Bound::Excluded(found.key().clone());
        Some(found.value().clone())
    }
}
