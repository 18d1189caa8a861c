// Compare pipeline: reads both files and runs the diff program concurrently,
// then aligns the results into the payload a renderer consumes.

use std::path::Path;
use std::thread::ScopedJoinHandle;

use serde::{Deserialize, Serialize};

use twain_core::{AlignedChanges, AlignedGaps, AlignedView, LineSequence};
use twain_diff::{read_lines, Aligner, DiffOracle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContents {
    pub contents: LineSequence,
}

/// Response body for a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparePayload {
    pub from_file: FileContents,
    pub to_file: FileContents,
    pub changes: AlignedChanges,
    pub gaps: AlignedGaps,
}

impl From<AlignedView> for ComparePayload {
    fn from(view: AlignedView) -> Self {
        Self {
            from_file: FileContents { contents: view.from_aligned },
            to_file: FileContents { contents: view.to_aligned },
            changes: view.changes,
            gaps: view.gaps,
        }
    }
}

/// Response body for viewing a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPayload {
    pub file: FileContents,
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Read `from` and `to` and diff them concurrently, then align. Fails as a
/// whole if any of the three tasks fails.
pub fn compare(from: &Path, to: &Path, oracle: &DiffOracle) -> twain_diff::Result<AlignedView> {
    let (from_lines, to_lines, changes) = std::thread::scope(|s| {
        let from_task = s.spawn(|| read_lines(from));
        let to_task = s.spawn(|| read_lines(to));
        let changes = oracle.run(from, to);
        (join(from_task), join(to_task), changes)
    });
    let from_lines = from_lines?;
    let to_lines = to_lines?;
    let changes = changes?;

    log::info!(
        "compared {} ({} lines) with {} ({} lines): +{} -{}",
        from.display(),
        from_lines.len(),
        to.display(),
        to_lines.len(),
        changes.additions.len(),
        changes.deletions.len()
    );
    Ok(Aligner::new().align(&from_lines, &to_lines, &changes))
}

pub fn view(path: &Path) -> twain_diff::Result<ViewPayload> {
    let contents = read_lines(path)?;
    Ok(ViewPayload { file: FileContents { contents } })
}
