//! # rsplit
//!
//! Splits one input stream into a bounded sequence of output files:
//! - by line count ([`Splitter::by_lines`])
//! - by byte count ([`Splitter::by_bytes`], sizes via [`parse_size`])
//! - into N near-equal chunks ([`Splitter::by_number`])
//!
//! Chunks are named `<prefix>aa`, `<prefix>ab`, ... (or `00`..`99` with
//! numeric suffixes), so at most 676 (or 100) files are produced.

pub mod diskspace;
pub mod error;
pub mod output;
pub mod safeint;
pub mod size;
pub mod split;
pub mod suffix;
pub mod telemetry;

pub use diskspace::{DiskSpaceGuard, FixedProbe, FreeSpaceProbe, SystemProbe};
pub use error::{ErrorKind, Result, SplitError};
pub use size::parse_size;
pub use split::observer::{ChunkObserver, NoopObserver, WriterObserver};
pub use split::types::{ChunkInfo, SplitSummary};
pub use split::Splitter;
pub use suffix::SuffixMode;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
