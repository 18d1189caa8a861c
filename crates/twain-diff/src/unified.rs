// Unified diff parsing: turns `diff -u` output into line-level change records.

use std::borrow::Cow;
use std::io::BufRead;
use std::sync::OnceLock;

use twain_core::{Addition, ChangeSet, Deletion};

use crate::error::{Error, Result};

fn hunk_header_re() -> &'static regex::Regex {
    static HUNK_RE: OnceLock<regex::Regex> = OnceLock::new();
    HUNK_RE.get_or_init(|| {
        // Trailing section headings (`git diff`, `diff -p`) are allowed after the closing @@.
        regex::Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
    })
}

/// First line a range covers. An empty range names the line before it.
fn range_start(start: &str, len: Option<regex::Match<'_>>) -> Option<usize> {
    let start: usize = start.parse().ok()?;
    match len.map(|m| m.as_str()) {
        Some("0") => Some(start + 1),
        _ => Some(start),
    }
}

/// Parse a hunk header into the from/to line numbers of its first line.
pub fn parse_hunk_header(line: &str) -> Option<(usize, usize)> {
    let caps = hunk_header_re().captures(line)?;
    let from = range_start(&caps[1], caps.get(2))?;
    let to = range_start(&caps[3], caps.get(4))?;
    Some((from, to))
}

/// Decode one raw line, replacing invalid UTF-8 and dropping the line ending.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Parses a unified diff stream into a [`ChangeSet`].
///
/// Each call is independent; the parser holds no state between streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffComputer;

impl DiffComputer {
    pub fn new() -> Self {
        Self
    }

    /// Consume `reader` line by line, in order. Any read error aborts the whole
    /// computation and no partial change set is returned.
    /// Bytes that are not valid UTF-8 are replaced, as [`read_lines`](crate::read_lines) does.
    pub fn compute<R: BufRead>(&self, mut reader: R) -> Result<ChangeSet> {
        let mut parser = HunkParser::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).map_err(Error::Stream)?;
            if n == 0 {
                break;
            }
            parser.feed(&decode_line(&buf));
        }
        let changes = parser.finish();
        log::debug!(
            "parsed unified diff: {} additions, {} deletions",
            changes.additions.len(),
            changes.deletions.len()
        );
        Ok(changes)
    }

    /// Parse diff text that is already in memory.
    pub fn compute_str(&self, text: &str) -> ChangeSet {
        let mut parser = HunkParser::default();
        for line in text.lines() {
            parser.feed(line);
        }
        parser.finish()
    }
}

/// Hunk state machine. `num_changes` counts consecutive deletions since the
/// last context line or hunk header so that an addition following a run of
/// deletions is anchored before that run.
#[derive(Debug, Default)]
struct HunkParser {
    from_line_no: usize,
    to_line_no: usize,
    num_changes: usize,
    in_hunk: bool,
    changes: ChangeSet,
}

impl HunkParser {
    fn feed(&mut self, line: &str) {
        if let Some((from, to)) = parse_hunk_header(line) {
            self.from_line_no = from;
            self.to_line_no = to;
            self.num_changes = 0;
            self.in_hunk = true;
            return;
        }
        // File headers (---/+++) and anything else before the first hunk.
        if !self.in_hunk {
            return;
        }

        match line.as_bytes().first() {
            Some(b'+') => {
                self.changes.additions.push(Addition {
                    line: self.to_line_no,
                    rel: self.from_line_no.saturating_sub(self.num_changes),
                });
                self.to_line_no += 1;
            }
            Some(b'-') => {
                self.changes.deletions.push(Deletion {
                    line: self.from_line_no,
                    rel: self.to_line_no,
                });
                self.from_line_no += 1;
                self.num_changes += 1;
            }
            Some(b' ') => {
                self.from_line_no += 1;
                self.to_line_no += 1;
                self.num_changes = 0;
            }
            // "\ No newline at end of file" and similar annotations.
            _ => {}
        }
    }

    fn finish(self) -> ChangeSet {
        self.changes
    }
}
