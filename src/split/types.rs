use std::path::PathBuf;

use serde::Serialize;

/// A chunk that was written and kept on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkInfo {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Chunks produced by one split, in suffix order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub chunks: Vec<ChunkInfo>,
}

impl SplitSummary {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.chunks.iter().map(|c| c.bytes).sum()
    }
}
