pub mod input;
pub mod observer;
pub mod types;
mod chunk_file;
mod logic;

use std::path::{Path, PathBuf};

use crate::diskspace::{DiskSpaceGuard, FreeSpaceProbe};
use crate::error::{ErrorKind, Result, SplitError};
use crate::suffix::SuffixMode;
use crate::telemetry::{self};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::split::{Phase as SplitPhase, Split};

use self::input::{Input, STDIN_SENTINEL};
use self::logic::Session;
use self::observer::{ChunkObserver, NoopObserver};
use self::types::SplitSummary;

/// Splits one input (a file path, or `-` for stdin) into `<prefix>aa`, `<prefix>ab`, ...
///
/// Chunks are written strictly in order, one open file at a time. An instance
/// holds per-invocation settings and is not meant to run overlapping splits.
pub struct Splitter {
    file_path: PathBuf,
    prefix: String,
    out_dir: PathBuf,
    suffix_mode: SuffixMode,
    elide_empty_files: bool,
    observer: Box<dyn ChunkObserver>,
    guard: DiskSpaceGuard,
}

impl Splitter {
    pub fn new(file_path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            prefix: prefix.into(),
            out_dir: PathBuf::from("."),
            suffix_mode: SuffixMode::Alphabetic,
            elide_empty_files: false,
            observer: Box::new(NoopObserver),
            guard: DiskSpaceGuard::default(),
        }
    }

    /// Directory the chunks are written to (default `.`).
    pub fn set_out_dir(&mut self, out_dir: impl Into<PathBuf>) {
        self.out_dir = out_dir.into();
    }

    pub fn set_numeric_suffix(&mut self, numeric: bool) {
        self.suffix_mode = if numeric { SuffixMode::Numeric } else { SuffixMode::Alphabetic };
    }

    /// Skip zero-byte chunks when splitting by number.
    pub fn set_elide_empty_files(&mut self, elide: bool) {
        self.elide_empty_files = elide;
    }

    pub fn set_observer(&mut self, observer: Box<dyn ChunkObserver>) {
        self.observer = observer;
    }

    pub fn set_probe(&mut self, probe: Box<dyn FreeSpaceProbe>) {
        self.guard = DiskSpaceGuard::new(probe);
    }

    /// Puts `n_lines` lines in each chunk. Every line is written with a `\n` terminator.
    pub fn by_lines(&mut self, n_lines: i64) -> Result<SplitSummary> {
        if n_lines <= 0 {
            return Err(SplitError::invalid_argument(format!("invalid number of lines: {}", n_lines)));
        }
        let log = telemetry::split();
        let _g = self.root_span(&log, "lines", n_lines).entered();

        let mut input = self.open_checked(&log)?;
        let mut session = Session::new(&self.out_dir, &self.prefix, self.suffix_mode, self.observer.as_mut(), &log);
        {
            let _w = log.span(&SplitPhase::WriteChunk).entered();
            logic::split_lines(&mut *input.reader, n_lines as u64, &mut session)?;
        }
        Ok(finish(&log, session))
    }

    /// Puts `n_bytes` bytes in each chunk; the last one may be shorter.
    pub fn by_bytes(&mut self, n_bytes: i64) -> Result<SplitSummary> {
        if n_bytes <= 0 {
            return Err(SplitError::invalid_argument(format!("invalid number of bytes: {}", n_bytes)));
        }
        let log = telemetry::split();
        let _g = self.root_span(&log, "bytes", n_bytes).entered();

        let mut input = self.open_checked(&log)?;
        let mut session = Session::new(&self.out_dir, &self.prefix, self.suffix_mode, self.observer.as_mut(), &log);
        {
            let _w = log.span(&SplitPhase::WriteChunk).entered();
            logic::split_bytes(&mut *input.reader, n_bytes as u64, &mut session)?;
        }
        Ok(finish(&log, session))
    }

    /// Splits a regular file into `n_chunks` files of near-equal size.
    pub fn by_number(&mut self, n_chunks: i64) -> Result<SplitSummary> {
        if n_chunks <= 0 {
            return Err(SplitError::invalid_argument(format!("invalid number of chunks: {}", n_chunks)));
        }
        if self.file_path == Path::new(STDIN_SENTINEL) {
            return Err(SplitError::new(ErrorKind::UnknownSize, "cannot determine file size of standard input"));
        }
        let log = telemetry::split();
        let _g = self.root_span(&log, "number", n_chunks).entered();

        let mut input = self.open_checked(&log)?;
        let Some(size) = input.size else {
            return Err(SplitError::new(
                ErrorKind::UnknownSize,
                format!("cannot determine file size: {}", self.file_path.display()),
            ));
        };
        let mut session = Session::new(&self.out_dir, &self.prefix, self.suffix_mode, self.observer.as_mut(), &log);
        {
            let _w = log.span(&SplitPhase::WriteChunk).entered();
            logic::split_number(&mut *input.reader, size, n_chunks as u64, self.elide_empty_files, &mut session)?;
        }
        Ok(finish(&log, session))
    }

    fn root_span(&self, log: &LogCtx<Split>, policy: &str, count: i64) -> tracing::Span {
        log.root_span_kv([
            ("policy", policy.to_string()),
            ("count", count.to_string()),
            ("input", self.file_path.display().to_string()),
            ("prefix", self.prefix.clone()),
            ("out_dir", self.out_dir.display().to_string()),
            ("suffix", format!("{:?}", self.suffix_mode)),
            ("elide_empty", self.elide_empty_files.to_string()),
        ])
    }

    /// Opens the input and runs the free-space preflight for sized inputs.
    fn open_checked(&self, log: &LogCtx<Split>) -> Result<Input> {
        if self.prefix.is_empty() {
            return Err(SplitError::invalid_argument("prefix must not be empty"));
        }
        let input = {
            let _s = log.span(&SplitPhase::OpenInput).entered();
            Input::open(&self.file_path)?
        };
        if let Some(size) = input.size {
            let _s = log.span(&SplitPhase::Preflight).entered();
            self.guard.check(&self.out_dir, size)?;
        }
        Ok(input)
    }
}

fn finish(log: &LogCtx<Split>, session: Session<'_>) -> SplitSummary {
    let summary = session.into_summary();
    log.totals(summary.len(), summary.total_bytes());
    summary
}
