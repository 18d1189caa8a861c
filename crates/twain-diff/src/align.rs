// Side-by-side alignment: merges two line sequences with their change records
// into two equal-length, row-synchronized sequences.

use twain_core::{
    Addition, AlignedChanges, AlignedGaps, AlignedRow, AlignedView, ChangeSet, Deletion,
};

/// Builds an [`AlignedView`] from two files and the changes between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aligner;

impl Aligner {
    pub fn new() -> Self {
        Self
    }

    /// Align `from` and `to` using `changes` as produced by
    /// [`DiffComputer`](crate::DiffComputer).
    ///
    /// The change lists must be ascending by `line` with `rel` values as the
    /// unified diff parser assigns them. Inconsistent input does not panic but
    /// the resulting layout is unspecified.
    pub fn align(&self, from: &[String], to: &[String], changes: &ChangeSet) -> AlignedView {
        let mut state = AlignState::new(from, to);
        let additions = &changes.additions;
        let deletions = &changes.deletions;
        let mut i_add = 0;
        let mut i_del = 0;

        while i_del < deletions.len() && i_add < additions.len() {
            let deletion = deletions[i_del];
            let addition = additions[i_add];

            state.advance_from(deletion.line.min(addition.rel));
            state.advance_to(addition.line.min(deletion.rel));

            if deletion.line < addition.rel {
                // No matching addition yet.
                state.push_deletion(true);
                i_del += 1;
            } else if addition.line < deletion.rel {
                state.push_addition(true);
                i_add += 1;
            } else {
                // Paired replace: both lines share one row.
                state.push_deletion(false);
                state.push_addition(false);
                i_del += 1;
                i_add += 1;
            }
        }

        for deletion in &deletions[i_del..] {
            state.drain_deletion(deletion);
        }
        for addition in &additions[i_add..] {
            state.drain_addition(addition);
        }

        state.finish()
    }
}

/// Running cursors and output buffers for one alignment pass.
struct AlignState<'a> {
    from: &'a [String],
    to: &'a [String],
    /// Source lines already copied out of each file.
    from_next: usize,
    to_next: usize,
    from_aligned: Vec<String>,
    to_aligned: Vec<String>,
    changes: AlignedChanges,
    gaps: AlignedGaps,
}

impl<'a> AlignState<'a> {
    fn new(from: &'a [String], to: &'a [String]) -> Self {
        let capacity = from.len().max(to.len());
        Self {
            from,
            to,
            from_next: 0,
            to_next: 0,
            from_aligned: Vec::with_capacity(capacity),
            to_aligned: Vec::with_capacity(capacity),
            changes: AlignedChanges::default(),
            gaps: AlignedGaps::default(),
        }
    }

    /// Copy context lines of the from-file up to (not including) line `extent`.
    fn advance_from(&mut self, extent: usize) {
        let stop = extent.saturating_sub(1).min(self.from.len());
        while self.from_next < stop {
            self.from_aligned.push(self.from[self.from_next].clone());
            self.from_next += 1;
        }
    }

    fn advance_to(&mut self, extent: usize) {
        let stop = extent.saturating_sub(1).min(self.to.len());
        while self.to_next < stop {
            self.to_aligned.push(self.to[self.to_next].clone());
            self.to_next += 1;
        }
    }

    fn next_from_line(&mut self) -> String {
        let line = match self.from.get(self.from_next) {
            Some(line) => line.clone(),
            None => {
                log::debug!("deletion past end of from-file at line {}", self.from_next + 1);
                String::new()
            }
        };
        self.from_next += 1;
        line
    }

    fn next_to_line(&mut self) -> String {
        let line = match self.to.get(self.to_next) {
            Some(line) => line.clone(),
            None => {
                log::debug!("addition past end of to-file at line {}", self.to_next + 1);
                String::new()
            }
        };
        self.to_next += 1;
        line
    }

    /// Emit the next from-line as a deletion row, optionally with a gap opposite.
    fn push_deletion(&mut self, blank: bool) {
        let line = self.next_from_line();
        self.from_aligned.push(line);
        self.changes.deletions.push(AlignedRow { line: self.from_aligned.len() });
        if blank {
            self.to_aligned.push(String::new());
            self.gaps.to.push(AlignedRow { line: self.to_aligned.len() });
        }
    }

    fn push_addition(&mut self, blank: bool) {
        let line = self.next_to_line();
        self.to_aligned.push(line);
        self.changes.additions.push(AlignedRow { line: self.to_aligned.len() });
        if blank {
            self.from_aligned.push(String::new());
            self.gaps.from.push(AlignedRow { line: self.from_aligned.len() });
        }
    }

    /// A deletion left over once every addition is placed. The to-side is brought
    /// up to the context preceding `rel`; a gap is added only if no to-line
    /// already occupies the row.
    fn drain_deletion(&mut self, deletion: &Deletion) {
        self.advance_from(deletion.line);
        self.advance_to(deletion.rel);
        let blank = self.to_aligned.len() <= self.from_aligned.len();
        self.push_deletion(blank);
    }

    fn drain_addition(&mut self, addition: &Addition) {
        self.advance_to(addition.line);
        self.advance_from(addition.rel);
        let blank = self.from_aligned.len() <= self.to_aligned.len();
        self.push_addition(blank);
    }

    fn finish(mut self) -> AlignedView {
        let from_rest = self.from.get(self.from_next..).unwrap_or_default();
        self.from_aligned.extend(from_rest.iter().cloned());
        let to_rest = self.to.get(self.to_next..).unwrap_or_default();
        self.to_aligned.extend(to_rest.iter().cloned());

        if self.from_aligned.len() != self.to_aligned.len() {
            log::debug!(
                "padding aligned view: from={} to={}",
                self.from_aligned.len(),
                self.to_aligned.len()
            );
        }
        while self.from_aligned.len() < self.to_aligned.len() {
            self.from_aligned.push(String::new());
            self.gaps.from.push(AlignedRow { line: self.from_aligned.len() });
        }
        while self.to_aligned.len() < self.from_aligned.len() {
            self.to_aligned.push(String::new());
            self.gaps.to.push(AlignedRow { line: self.to_aligned.len() });
        }

        AlignedView {
            from_aligned: self.from_aligned,
            to_aligned: self.to_aligned,
            changes: self.changes,
            gaps: self.gaps,
        }
    }
}
