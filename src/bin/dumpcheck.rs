//! dumpcheck CLI tool
//!
//! Loads one or more dump log files, reconstructs the per-tag byte streams
//! and reports every byte where the mirrored stream pairs diverge.

use anyhow::{Context, Result};
use clap::Parser;
use dumpcheck::{compare, report, StreamSet, Tag};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dumpcheck")]
#[command(about = "Cross-checks mirrored transport hex-dump logs byte-for-byte")]
struct Cli {
    /// Log files, processed in the order given
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Cap the number of mismatches printed
    #[arg(long)]
    limit: Option<usize>,
    /// Disable reverse-video emphasis of the mismatching hex token
    #[arg(long)]
    no_highlight: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("Loading {} log file(s)...", cli.files.len());
    let streams = StreamSet::load(&cli.files).context("failed to load logs")?;

    for tag in Tag::ALL {
        let stream = streams.stream(tag);
        if stream.record_count() > 0 {
            println!(
                "  {}: {} bytes from {} lines",
                tag,
                stream.len(),
                stream.record_count()
            );
        }
    }
    println!("  Total: {} bytes", streams.total_bytes());

    println!("Comparing stream pairs...");
    let mismatches = compare(&streams);

    let opts = report::ReportOptions {
        highlight: !cli.no_highlight,
        limit: cli.limit,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &mismatches, &opts)?;
    out.flush()?;

    // Mismatches are the report's business, not the exit code's: only usage
    // errors and I/O failures are non-zero.
    Ok(())
}
