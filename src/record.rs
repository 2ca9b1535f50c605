//! Log line parsing
//!
//! A record line looks like
//!
//! ```text
//! 12:00:00.000000 l:toenc: 0a 0b 0c
//! ```
//!
//! i.e. a microsecond timestamp, one of the eight known tags, then
//! whitespace-separated two-digit hex bytes. Dump logs interleave plenty of
//! unrelated output, so anything else on a line is not a record and is
//! skipped without comment. A line whose tag matches but whose hex data is
//! malformed is dropped as a whole; no partial bytes are ever committed.

use chrono::NaiveTime;

use crate::tag::Tag;

/// One parsed record line, before it is folded into a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Timestamp text exactly as logged (`HH:MM:SS.ffffff`)
    pub timestamp: String,
    pub tag: Tag,
    pub bytes: Vec<u8>,
    /// The full original line, trailing newline stripped
    pub line: String,
}

/// Timestamp length: `HH:MM:SS.ffffff`
const TIMESTAMP_LEN: usize = 15;

fn valid_timestamp(stamp: &str) -> bool {
    stamp.len() == TIMESTAMP_LEN && NaiveTime::parse_from_str(stamp, "%H:%M:%S%.6f").is_ok()
}

/// Parse one raw log line into a record, or `None` if the line is not a
/// record. `None` covers both "unrelated line" and "record-shaped but
/// malformed"; callers never see partial records.
pub fn parse_line(raw: &str) -> Option<LogRecord> {
    let line = raw.trim_end_matches(['\r', '\n']);

    let (stamp, rest) = line.split_once(char::is_whitespace)?;
    if !valid_timestamp(stamp) {
        return None;
    }

    // Tag is the next two colon-separated fields; everything after the
    // second colon is hex data.
    let mut fields = rest.trim_start().splitn(3, ':');
    let side = fields.next()?;
    let channel = fields.next()?;
    let data = fields.next()?;
    let tag = Tag::from_fields(side, channel)?;

    // A single bad token rejects the whole line.
    let mut bytes = Vec::new();
    for token in data.split_whitespace() {
        let decoded = hex::decode(token).ok()?;
        if decoded.len() != 1 {
            return None;
        }
        bytes.push(decoded[0]);
    }

    Some(LogRecord {
        timestamp: stamp.to_string(),
        tag,
        bytes,
        line: line.to_string(),
    })
}
