use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use serde::Serialize;

use rsplit::telemetry::{self};
use rsplit::{parse_size, ChunkInfo, Splitter, WriterObserver};

const DEFAULT_LINES: i64 = 1000;

#[derive(Parser)]
#[command(
    name = "rsplit",
    version,
    about = "Output pieces of FILE to PREFIXaa, PREFIXab, ...",
    long_about = "Output pieces of FILE to PREFIXaa, PREFIXab, ...; \
                  default size is 1000 lines, and default PREFIX is 'x'.\n\n\
                  With no FILE, or when FILE is -, read standard input."
)]
struct Cli {
    /// Put NUMBER lines per output file
    #[arg(short = 'l', long, value_name = "NUMBER", conflicts_with_all = ["bytes", "number"])]
    lines: Option<i64>,
    /// Put SIZE bytes per output file (e.g. 10K, 2MiB, 5MB, 4b)
    #[arg(short = 'b', long, value_name = "SIZE", value_parser = parse_size, conflicts_with = "number")]
    bytes: Option<i64>,
    /// Split into N files based on size of input
    #[arg(short = 'n', long, value_name = "N")]
    number: Option<i64>,
    /// Use numeric suffixes (00..99) instead of alphabetic (aa..zz)
    #[arg(short = 'd', long, default_value_t = false)]
    numeric_suffixes: bool,
    /// Do not generate empty output files with -n
    #[arg(short = 'e', long, default_value_t = false)]
    elide_empty_files: bool,
    /// Print a diagnostic just before each output file is opened
    #[arg(long, default_value_t = false)]
    verbose: bool,
    /// Directory to write the output files to
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
    /// List the produced chunks on stdout when done
    #[arg(long, default_value_t = false)]
    report: bool,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(default_value = "-")]
    file: PathBuf,
    #[arg(default_value = "x")]
    prefix: String,
}

#[derive(Serialize)]
struct SplitResult {
    policy: &'static str,
    count: i64,
    input: String,
    total_bytes: u64,
    chunks: Vec<ChunkInfo>,
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);
    let t0 = Instant::now();

    // initialize logging/tracing (stderr). Respect RUST_LOG and RSPLIT_LOG_FORMAT
    telemetry::config::init_tracing();

    let mut splitter = Splitter::new(cli.file.clone(), cli.prefix.clone());
    splitter.set_out_dir(cli.out_dir.clone());
    splitter.set_numeric_suffix(cli.numeric_suffixes);
    splitter.set_elide_empty_files(cli.elide_empty_files);
    if cli.verbose {
        // stdout carries the JSON envelope in --json mode
        if cli.json {
            splitter.set_observer(Box::new(WriterObserver::new(io::stderr())));
        } else {
            splitter.set_observer(Box::new(WriterObserver::new(io::stdout())));
        }
    }

    let (policy, count, summary) = match (cli.lines, cli.bytes, cli.number) {
        (_, Some(n), _) => ("bytes", n, splitter.by_bytes(n)),
        (_, _, Some(n)) => ("number", n, splitter.by_number(n)),
        (lines, _, _) => {
            let n = lines.unwrap_or(DEFAULT_LINES);
            ("lines", n, splitter.by_lines(n))
        }
    };
    let summary = summary.with_context(|| format!("split {} by {}", cli.file.display(), policy))?;

    if cli.json || cli.report {
        let res = SplitResult {
            policy,
            count,
            input: cli.file.display().to_string(),
            total_bytes: summary.total_bytes(),
            chunks: summary.chunks,
        };
        let log = telemetry::split();
        log.result(&res, Some(t0.elapsed().as_millis()))?;
    }

    Ok(())
}
