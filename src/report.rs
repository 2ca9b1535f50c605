//! Human-readable mismatch reporting
//!
//! Renders the comparator's output with the originating log line for each
//! side, optionally wrapping the exact mismatching hex token in reverse
//! video so it can be spotted inside a long dump line. Emphasis is applied
//! to a re-rendered copy of the line only; stored provenance text is never
//! touched.

use std::io::{self, Write};

use crate::compare::Mismatch;
use crate::streams::SourceSpan;

const REVERSE_VIDEO: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Wrap the mismatching hex token in reverse video
    pub highlight: bool,
    /// Cap on rendered mismatches; the remainder is summarized in one line
    pub limit: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            highlight: true,
            limit: None,
        }
    }
}

fn format_byte(byte: Option<u8>) -> String {
    match byte {
        Some(b) => format!("{b:02x}"),
        None => "N/A".to_string(),
    }
}

/// Re-render a provenance line with the token carrying stream offset
/// `position` wrapped in reverse video. Token index within the line is
/// `position - span.start`. Falls back to the unmodified text if the stored
/// line no longer splits the way the parser saw it.
fn emphasize_token(span: &SourceSpan, position: usize) -> String {
    let line = &span.line;
    let Some((stamp, rest)) = line.split_once(char::is_whitespace) else {
        return line.clone();
    };
    let mut fields = rest.trim_start().splitn(3, ':');
    let (Some(side), Some(channel), Some(data)) = (fields.next(), fields.next(), fields.next())
    else {
        return line.clone();
    };

    let mut tokens: Vec<String> = data.split_whitespace().map(str::to_string).collect();
    if let Some(token) = tokens.get_mut(position - span.start) {
        *token = format!("{REVERSE_VIDEO}{token}{RESET}");
    }
    format!("{stamp} {side}:{channel}:{}", tokens.join(" "))
}

fn write_side<W: Write>(
    w: &mut W,
    tag: impl std::fmt::Display,
    origin: Option<&SourceSpan>,
    position: usize,
    opts: &ReportOptions,
) -> io::Result<()> {
    let Some(span) = origin else {
        return Ok(());
    };
    let line = if opts.highlight {
        emphasize_token(span, position)
    } else {
        span.line.clone()
    };
    writeln!(w, "  {tag} log line:")?;
    writeln!(w, "    {}:{}: {line}", span.file, span.line_no)
}

/// Render the full report. An empty mismatch list is the success case.
pub fn write_report<W: Write>(
    w: &mut W,
    mismatches: &[Mismatch<'_>],
    opts: &ReportOptions,
) -> io::Result<()> {
    if mismatches.is_empty() {
        writeln!(w, "✅ All stream pairs match.")?;
        return Ok(());
    }

    writeln!(w, "❌ {} mismatched bytes found:", mismatches.len())?;
    writeln!(w)?;

    let shown = opts.limit.unwrap_or(mismatches.len()).min(mismatches.len());
    for m in &mismatches[..shown] {
        writeln!(w, "position {}: {} vs {}", m.position, m.tag_a, m.tag_b)?;
        writeln!(w, "  {}: {}", m.tag_a, format_byte(m.byte_a))?;
        writeln!(w, "  {}: {}", m.tag_b, format_byte(m.byte_b))?;
        writeln!(w)?;
        write_side(w, m.tag_a, m.origin_a, m.position, opts)?;
        write_side(w, m.tag_b, m.origin_b, m.position, opts)?;
        writeln!(w, "{}", "-".repeat(RULE_WIDTH))?;
    }

    if shown < mismatches.len() {
        writeln!(w, "... and {} more", mismatches.len() - shown)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::record::parse_line;
    use crate::streams::StreamSet;

    fn set_from_lines(lines: &[&str]) -> StreamSet {
        let mut set = StreamSet::new();
        for (i, line) in lines.iter().enumerate() {
            set.fold_record("test.log", i + 1, parse_line(line).unwrap());
        }
        set
    }

    fn render(set: &StreamSet, opts: &ReportOptions) -> String {
        let mismatches = compare(set);
        let mut out = Vec::new();
        write_report(&mut out, &mismatches, opts).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_success_message_when_clean() {
        let set = set_from_lines(&[
            "12:00:00.000000 l:toenc: 0a",
            "12:00:00.000001 r:dec-d: 0a",
        ]);
        let out = render(&set, &ReportOptions::default());
        assert!(out.contains("All stream pairs match"));
    }

    #[test]
    fn test_report_names_both_sides() {
        let set = set_from_lines(&[
            "12:00:00.000000 l:toenc: 0a 0b 0c",
            "12:00:00.000001 r:dec-d: 0a 0b 0d",
        ]);
        let out = render(&set, &ReportOptions { highlight: false, limit: None });

        assert!(out.contains("1 mismatched bytes found"));
        assert!(out.contains("position 2: l:toenc vs r:dec-d"));
        assert!(out.contains("  l:toenc: 0c"));
        assert!(out.contains("  r:dec-d: 0d"));
        assert!(out.contains("test.log:1: 12:00:00.000000 l:toenc: 0a 0b 0c"));
        assert!(out.contains("test.log:2: 12:00:00.000000 r:dec-d: 0a 0b 0d"));
    }

    #[test]
    fn test_absent_side_renders_na() {
        let set = set_from_lines(&[
            "12:00:00.000000 l:toenc: 01",
            "12:00:00.000001 r:dec-d: 01 02",
        ]);
        let out = render(&set, &ReportOptions { highlight: false, limit: None });
        assert!(out.contains("  l:toenc: N/A"));
        assert!(out.contains("  r:dec-d: 02"));
        // Only the resolving side gets a log-line block.
        assert!(!out.contains("l:toenc log line:"));
        assert!(out.contains("r:dec-d log line:"));
    }

    #[test]
    fn test_highlight_wraps_exact_token() {
        let set = set_from_lines(&[
            "12:00:00.000000 l:toenc: 0a 0b 0c",
            "12:00:00.000001 r:dec-d: 0a 0b 0d",
        ]);
        let out = render(&set, &ReportOptions::default());
        // Position 2 is token index 2 on both lines.
        assert!(out.contains("0a 0b \x1b[7m0c\x1b[0m"));
        assert!(out.contains("0a 0b \x1b[7m0d\x1b[0m"));
    }

    #[test]
    fn test_highlight_does_not_mutate_provenance() {
        let set = set_from_lines(&[
            "12:00:00.000000 l:toenc: 0a",
            "12:00:00.000001 r:dec-d: 0b",
        ]);
        let _ = render(&set, &ReportOptions::default());
        let span = set.locate("l:toenc".parse().unwrap(), 0).unwrap();
        assert_eq!(span.line, "12:00:00.000000 l:toenc: 0a");
    }

    #[test]
    fn test_highlight_targets_offset_within_span() {
        // Two records on one stream; mismatch lands in the second line.
        let set = set_from_lines(&[
            "12:00:00.000000 l:toenc: 0a 0b",
            "12:00:00.000001 l:toenc: 0c 0d",
            "12:00:00.000002 r:dec-d: 0a 0b 0c ff",
        ]);
        let out = render(&set, &ReportOptions::default());
        // Stream offset 3 is token index 1 of the second l:toenc line.
        assert!(out.contains("0c \x1b[7m0d\x1b[0m"));
    }

    #[test]
    fn test_limit_truncates_report() {
        let set = set_from_lines(&[
            "12:00:00.000000 l:toenc: 00 01 02 03",
            "12:00:00.000001 r:dec-d: ff ff ff ff",
        ]);
        let out = render(&set, &ReportOptions { highlight: false, limit: Some(1) });
        assert!(out.contains("4 mismatched bytes found"));
        assert!(out.contains("position 0:"));
        assert!(!out.contains("position 1:"));
        assert!(out.contains("... and 3 more"));
    }
}
