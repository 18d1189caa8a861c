// twain-core: value types shared by the diff engine and its front ends.

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Lines
// ──────────────────────────────────────────────

/// An ordered sequence of text lines. Change bookkeeping treats it as 1-indexed.
pub type LineSequence = Vec<String>;

/// Which of the two compared files a line or row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    From,
    To,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

// ──────────────────────────────────────────────
// Changes (native line numbering)
// ──────────────────────────────────────────────

/// A line present only in the to-file.
///
/// `line` is 1-indexed into the to-file; `rel` is the from-file line at or
/// before which the addition falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Addition {
    pub line: usize,
    pub rel: usize,
}

/// A line present only in the from-file.
///
/// `line` is 1-indexed into the from-file; `rel` is the to-file line at or
/// before which the deletion falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deletion {
    pub line: usize,
    pub rel: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Addition(Addition),
    Deletion(Deletion),
}

impl Change {
    /// Line number in the file that owns this change.
    pub fn line(&self) -> usize {
        match self {
            Change::Addition(a) => a.line,
            Change::Deletion(d) => d.line,
        }
    }

    pub fn rel(&self) -> usize {
        match self {
            Change::Addition(a) => a.rel,
            Change::Deletion(d) => d.rel,
        }
    }

    /// The side whose numbering `line` refers to.
    pub fn side(&self) -> Side {
        match self {
            Change::Addition(_) => Side::To,
            Change::Deletion(_) => Side::From,
        }
    }
}

impl From<Addition> for Change {
    fn from(a: Addition) -> Self {
        Change::Addition(a)
    }
}

impl From<Deletion> for Change {
    fn from(d: Deletion) -> Self {
        Change::Deletion(d)
    }
}

/// Line-level additions and deletions, each list ascending by `line`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub additions: Vec<Addition>,
    pub deletions: Vec<Deletion>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the two files are identical.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }

    pub fn push(&mut self, change: impl Into<Change>) {
        match change.into() {
            Change::Addition(a) => self.additions.push(a),
            Change::Deletion(d) => self.deletions.push(d),
        }
    }

    /// Both lists strictly ascending by `line`.
    pub fn is_ordered(&self) -> bool {
        self.additions.windows(2).all(|w| w[0].line < w[1].line)
            && self.deletions.windows(2).all(|w| w[0].line < w[1].line)
    }
}

// ──────────────────────────────────────────────
// Aligned view (shared row numbering)
// ──────────────────────────────────────────────

/// A 1-indexed row in the aligned coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlignedRow {
    pub line: usize,
}

/// Change markers re-expressed as aligned rows. Position alone encodes alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedChanges {
    pub additions: Vec<AlignedRow>,
    pub deletions: Vec<AlignedRow>,
}

/// Rows that are fillers on each side, as opposed to genuinely empty source lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedGaps {
    pub from: Vec<AlignedRow>,
    pub to: Vec<AlignedRow>,
}

impl AlignedGaps {
    pub fn side(&self, side: Side) -> &[AlignedRow] {
        match side {
            Side::From => &self.from,
            Side::To => &self.to,
        }
    }
}

/// Two equal-length, row-synchronized line sequences ready for side-by-side rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedView {
    pub from_aligned: LineSequence,
    pub to_aligned: LineSequence,
    pub changes: AlignedChanges,
    pub gaps: AlignedGaps,
}

impl AlignedView {
    /// Number of rows; both sides always have this many.
    pub fn row_count(&self) -> usize {
        debug_assert_eq!(self.from_aligned.len(), self.to_aligned.len());
        self.from_aligned.len()
    }

    pub fn lines(&self, side: Side) -> &[String] {
        match side {
            Side::From => &self.from_aligned,
            Side::To => &self.to_aligned,
        }
    }

    /// Recover the original lines of one side by dropping its filler rows.
    pub fn unaligned(&self, side: Side) -> LineSequence {
        let gaps = self.gaps.side(side);
        let mut gap_iter = gaps.iter().map(|g| g.line).peekable();
        let mut out = Vec::with_capacity(self.row_count().saturating_sub(gaps.len()));
        for (i, line) in self.lines(side).iter().enumerate() {
            let row = i + 1;
            if gap_iter.peek() == Some(&row) {
                gap_iter.next();
                continue;
            }
            out.push(line.clone());
        }
        out
    }

    /// Classify a 1-indexed row for renderers.
    pub fn row_kind(&self, row: usize) -> RowKind {
        let deleted = self.changes.deletions.binary_search(&AlignedRow { line: row }).is_ok();
        let added = self.changes.additions.binary_search(&AlignedRow { line: row }).is_ok();
        match (deleted, added) {
            (true, true) => RowKind::Replaced,
            (true, false) => RowKind::Deleted,
            (false, true) => RowKind::Added,
            (false, false) => RowKind::Context,
        }
    }
}

/// How a single aligned row should be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Context,
    Added,
    Deleted,
    /// Paired replace: deletion and addition share the row.
    Replaced,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> LineSequence {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn change_set_push_routes_by_variant() {
        let mut changes = ChangeSet::new();
        changes.push(Deletion { line: 2, rel: 2 });
        changes.push(Addition { line: 2, rel: 2 });
        changes.push(Addition { line: 3, rel: 2 });
        assert_eq!(changes.deletions.len(), 1);
        assert_eq!(changes.additions.len(), 2);
        assert!(changes.is_ordered());
        assert!(!changes.is_empty());
    }

    #[test]
    fn unordered_change_set_detected() {
        let changes = ChangeSet {
            additions: vec![Addition { line: 3, rel: 1 }, Addition { line: 3, rel: 1 }],
            deletions: Vec::new(),
        };
        assert!(!changes.is_ordered());
    }

    #[test]
    fn change_accessors() {
        let c: Change = Deletion { line: 4, rel: 7 }.into();
        assert_eq!(c.line(), 4);
        assert_eq!(c.rel(), 7);
        assert_eq!(c.side(), Side::From);
        assert_eq!(c.side().other(), Side::To);
    }

    #[test]
    fn unaligned_drops_only_gap_rows() {
        let view = AlignedView {
            from_aligned: lines(&["a", "", "", "c"]),
            to_aligned: lines(&["a", "", "x", "c"]),
            changes: AlignedChanges {
                additions: vec![AlignedRow { line: 3 }],
                deletions: vec![AlignedRow { line: 2 }],
            },
            gaps: AlignedGaps {
                from: vec![AlignedRow { line: 3 }],
                to: vec![AlignedRow { line: 2 }],
            },
        };
        // Row 2 on the from side is a real empty line, not a gap.
        assert_eq!(view.unaligned(Side::From), lines(&["a", "", "c"]));
        assert_eq!(view.unaligned(Side::To), lines(&["a", "x", "c"]));
    }

    #[test]
    fn row_kind_classification() {
        let view = AlignedView {
            from_aligned: lines(&["a", "b", "c", ""]),
            to_aligned: lines(&["a", "x", "", "d"]),
            changes: AlignedChanges {
                additions: vec![AlignedRow { line: 2 }, AlignedRow { line: 4 }],
                deletions: vec![AlignedRow { line: 2 }, AlignedRow { line: 3 }],
            },
            gaps: AlignedGaps::default(),
        };
        assert_eq!(view.row_kind(1), RowKind::Context);
        assert_eq!(view.row_kind(2), RowKind::Replaced);
        assert_eq!(view.row_kind(3), RowKind::Deleted);
        assert_eq!(view.row_kind(4), RowKind::Added);
    }

    #[test]
    fn aligned_view_serializes_camel_case() {
        let view = AlignedView {
            from_aligned: lines(&["a"]),
            to_aligned: lines(&["a"]),
            ..Default::default()
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("fromAligned").is_some());
        assert!(json.get("toAligned").is_some());
        assert_eq!(json["changes"]["additions"], serde_json::json!([]));
    }
}
