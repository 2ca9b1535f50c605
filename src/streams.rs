//! Per-tag stream reconstruction with provenance
//!
//! Records are folded into one growing byte stream per tag, in file order
//! then line order. Cross-file interleaving is never attempted: all of file
//! N's bytes for a tag precede file N+1's, regardless of timestamps. Each
//! folded record also appends a [`SourceSpan`] so any byte offset can be
//! traced back to the exact file, line number and original text that
//! produced it.
//!
//! [`StreamSet::load`] is the load phase of the two-phase pipeline: it
//! consumes every file to completion and hands back the accumulator as a
//! snapshot the compare phase only reads.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::record::{parse_line, LogRecord};
use crate::tag::Tag;

/// Fatal I/O failure during the load phase. Parse-level problems are not
/// errors; unreadable files are, and abort the run before comparison.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open log file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read log file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Provenance for one contiguous byte range of a stream: which log line put
/// those bytes there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub file: String,
    /// 1-based line number within `file`
    pub line_no: usize,
    /// Original line text, stored verbatim and never mutated
    pub line: String,
    /// Offset of the first byte in the stream, equal to the stream length
    /// before this record was folded
    pub start: usize,
    /// Byte count of the parsed record; zero-length spans are legal
    pub len: usize,
}

/// One tag's reconstructed byte stream plus its ordered span list.
///
/// Spans partition `[0, len())` contiguously: `spans[i].start + spans[i].len
/// == spans[i+1].start`, and `spans[0].start == 0`.
#[derive(Debug, Default, Clone)]
pub struct TagStream {
    bytes: Vec<u8>,
    spans: Vec<SourceSpan>,
}

impl TagStream {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    pub fn spans(&self) -> &[SourceSpan] {
        &self.spans
    }

    /// Number of records folded into this stream
    pub fn record_count(&self) -> usize {
        self.spans.len()
    }

    /// The span whose `[start, start + len)` range contains `offset`, or
    /// `None` past the end of the stream. Start is inclusive, end exclusive:
    /// the byte at `start + len` belongs to the next span. Zero-length spans
    /// contain no offsets and are never returned.
    pub fn span_at(&self, offset: usize) -> Option<&SourceSpan> {
        if offset >= self.bytes.len() {
            return None;
        }
        // Span end offsets are non-decreasing; the containing span is the
        // first one ending past `offset`.
        let idx = self.spans.partition_point(|s| s.start + s.len <= offset);
        self.spans.get(idx)
    }

    fn fold(&mut self, file: &str, line_no: usize, record: LogRecord) {
        self.spans.push(SourceSpan {
            file: file.to_string(),
            line_no,
            line: record.line,
            start: self.bytes.len(),
            len: record.bytes.len(),
        });
        self.bytes.extend_from_slice(&record.bytes);
    }
}

/// All eight tag streams, built by the load phase and read-only afterwards
#[derive(Debug, Default)]
pub struct StreamSet {
    streams: [TagStream; 8],
}

impl StreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file, in the order given, parsing each line in physical
    /// order. All-or-nothing: the first I/O failure aborts the whole load.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, LoadError> {
        let mut set = StreamSet::new();
        for path in paths {
            set.load_file(path.as_ref())?;
        }
        Ok(set)
    }

    /// Parse one file to completion, folding every record line
    pub fn load_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.display().to_string();
        let reader = BufReader::new(file);

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if let Some(record) = parse_line(&line) {
                self.fold_record(&name, idx + 1, record);
            }
        }
        Ok(())
    }

    /// Fold one already-parsed record into its tag's stream. Touches exactly
    /// one stream; `line_no` is 1-based.
    pub fn fold_record(&mut self, file: &str, line_no: usize, record: LogRecord) {
        self.streams[record.tag.index()].fold(file, line_no, record);
    }

    pub fn stream(&self, tag: Tag) -> &TagStream {
        &self.streams[tag.index()]
    }

    /// Offset → provenance lookup for one tag's stream
    pub fn locate(&self, tag: Tag, offset: usize) -> Option<&SourceSpan> {
        self.stream(tag).span_at(offset)
    }

    /// Total bytes folded across all eight streams
    pub fn total_bytes(&self) -> usize {
        self.streams.iter().map(|s| s.len()).sum()
    }
}
