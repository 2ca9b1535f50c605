//! dumpcheck - byte-for-byte cross-check of mirrored transport dump logs
//!
//! An encode/decode pipeline logged from two vantage points (local and
//! remote) across four channels produces tagged hex-dump lines. This crate
//! reassembles the per-tag byte streams from those logs, keeps provenance
//! for every byte, and diffs the four mirrored stream pairs, reporting each
//! divergence together with the exact log lines that produced both sides.
//!
//! Batch, two-phase pipeline: load every file to completion, then compare.
//! Not a streaming monitor.

pub mod compare;
pub mod record;
pub mod report;
/// Per-tag stream reconstruction and provenance
pub mod streams;
/// Tag vocabulary and the four stream pairings
pub mod tag;

pub use compare::{compare, Mismatch};
pub use record::{parse_line, LogRecord};
pub use report::{write_report, ReportOptions};
pub use streams::{LoadError, SourceSpan, StreamSet, TagStream};
pub use tag::{Channel, Side, Tag, PAIRINGS};
