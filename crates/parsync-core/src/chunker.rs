//! Chunker: deterministic partition of a File List into numbered chunks.
//!
//! Chunk `i` holds entries `[i*c, min((i+1)*c, N))`; only the last chunk can
//! be short. Indices are rendered with a fixed width so artifact names sort
//! in chunk order.

use std::ffi::OsString;
use std::num::NonZeroUsize;

use crate::enumerate::FileList;
use crate::error::{ParsyncError, Result};

/// Digits used for chunk and log artifact numbering.
pub const INDEX_WIDTH: usize = 8;

/// Validated chunk size (files per chunk).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    pub fn new(size: i64) -> Result<Self> {
        usize::try_from(size)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(ChunkSize)
            .ok_or_else(|| {
                ParsyncError::config(format!("chunk size must be a positive integer, got {size}"))
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Sequence number of a chunk and of everything derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkIndex(pub usize);

impl ChunkIndex {
    /// Zero-padded form used in artifact names, e.g. `00000002`.
    pub fn padded(self) -> String {
        format!("{:0width$}", self.0, width = INDEX_WIDTH)
    }
}

impl std::fmt::Display for ChunkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.padded())
    }
}

/// A contiguous slice of the File List.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub index: ChunkIndex,
    pub entries: &'a [OsString],
}

impl Chunk<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Number of chunks for `n` entries: `ceil(n / size)`.
pub fn chunk_count(n: usize, size: ChunkSize) -> usize {
    n.div_ceil(size.get())
}

pub fn partition(list: &FileList, size: ChunkSize) -> Vec<Chunk<'_>> {
    list.entries()
        .chunks(size.get())
        .enumerate()
        .map(|(i, entries)| Chunk {
            index: ChunkIndex(i),
            entries,
        })
        .collect()
}
