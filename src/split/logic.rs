// Chunking state machines, independent of where the input comes from.

use std::io::{self, BufRead, Read};
use std::path::Path;

use crate::error::{ErrorKind, Result, SplitError};
use crate::suffix::{generate_out_path, SuffixMode};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::split::{Phase as SplitPhase, Split};

use super::chunk_file::{remove_chunk, ChunkFile};
use super::observer::ChunkObserver;
use super::types::{ChunkInfo, SplitSummary};

/// Per-invocation state: naming, notification and the chunks kept so far.
pub(crate) struct Session<'a> {
    out_dir: &'a Path,
    prefix: &'a str,
    mode: SuffixMode,
    observer: &'a mut dyn ChunkObserver,
    log: &'a LogCtx<Split>,
    next_index: usize,
    summary: SplitSummary,
}

impl<'a> Session<'a> {
    pub fn new(
        out_dir: &'a Path,
        prefix: &'a str,
        mode: SuffixMode,
        observer: &'a mut dyn ChunkObserver,
        log: &'a LogCtx<Split>,
    ) -> Self {
        Self { out_dir, prefix, mode, observer, log, next_index: 0, summary: SplitSummary::default() }
    }

    pub fn into_summary(self) -> SplitSummary {
        self.summary
    }

    fn open_next(&mut self) -> Result<ChunkFile> {
        let path = generate_out_path(self.out_dir, self.prefix, self.next_index, self.mode)?;
        self.observer.on_chunk_created(&path);
        self.log.chunk_created(self.next_index, &path);
        let chunk = ChunkFile::create(path)?;
        self.next_index += 1;
        Ok(chunk)
    }

    fn keep(&mut self, chunk: ChunkFile) -> Result<()> {
        let (path, bytes) = chunk.close()?;
        self.summary.chunks.push(ChunkInfo { path, bytes });
        Ok(())
    }

    /// Closes the chunk, then removes it from disk.
    fn discard(&mut self, chunk: ChunkFile) -> Result<()> {
        let _c = self.log.span(&SplitPhase::Cleanup).entered();
        let (path, _) = chunk.close()?;
        remove_chunk(&path)?;
        self.log.chunk_removed(&path);
        Ok(())
    }
}

fn read_error(e: io::Error) -> SplitError {
    SplitError::with_cause(ErrorKind::Io, "failed to read input", e)
}

fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

pub(crate) fn split_lines<R: BufRead + ?Sized>(r: &mut R, n_lines: u64, s: &mut Session<'_>) -> Result<()> {
    let mut line = Vec::new();
    loop {
        let mut chunk = s.open_next()?;
        let mut copied = 0u64;
        while copied < n_lines {
            line.clear();
            if r.read_until(b'\n', &mut line).map_err(read_error)? == 0 {
                break;
            }
            chunk.write_line(trim_terminator(&line))?;
            copied += 1;
        }
        if copied == 0 {
            return s.discard(chunk);
        }
        s.keep(chunk)?;
        if copied < n_lines {
            return Ok(());
        }
    }
}

pub(crate) fn split_bytes<R: Read + ?Sized>(r: &mut R, n_bytes: u64, s: &mut Session<'_>) -> Result<()> {
    loop {
        let mut chunk = s.open_next()?;
        let copied = chunk.copy_from(r, Some(n_bytes))?;
        if copied == 0 {
            return s.discard(chunk);
        }
        s.keep(chunk)?;
        if copied < n_bytes {
            return Ok(());
        }
    }
}

/// Splits `size` bytes into `n_chunks` files of `size / n_chunks` bytes; the
/// last file takes the remainder.
pub(crate) fn split_number<R: Read + ?Sized>(
    r: &mut R,
    size: u64,
    n_chunks: u64,
    elide_empty: bool,
    s: &mut Session<'_>,
) -> Result<()> {
    if size == 0 {
        return Ok(());
    }
    let chunk_size = size / n_chunks;
    // every intermediate chunk would be empty: only the remainder is written
    let only_last = elide_empty && chunk_size == 0;

    let planned = if only_last { 1 } else { n_chunks };
    let capacity = s.mode.capacity() as u64;
    if planned > capacity {
        return Err(SplitError::new(
            ErrorKind::SuffixExhausted,
            format!("output file suffixes exhausted: {} chunks requested, {} available", planned, capacity),
        ));
    }
    if !only_last {
        // bounded by the capacity check above
        for _ in 1..n_chunks {
            let mut chunk = s.open_next()?;
            let copied = chunk.copy_from(r, Some(chunk_size))?;
            if copied < chunk_size {
                s.log.warn(format!(
                    "input ended early: {} of {} bytes in {}",
                    copied,
                    chunk_size,
                    chunk.path().display()
                ));
                return if copied == 0 { s.discard(chunk) } else { s.keep(chunk) };
            }
            s.keep(chunk)?;
        }
    }
    copy_last(r, elide_empty, s)
}

/// Last chunk of a ByNumber split: takes whatever input remains.
fn copy_last<R: Read + ?Sized>(r: &mut R, elide_empty: bool, s: &mut Session<'_>) -> Result<()> {
    let mut chunk = s.open_next()?;
    let copied = chunk.copy_from(r, None)?;
    if copied == 0 && elide_empty {
        return s.discard(chunk);
    }
    s.keep(chunk)
}
