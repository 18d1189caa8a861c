// Line loading: reads a file into the line sequence the aligner works on.

use std::fs;
use std::path::Path;

use twain_core::LineSequence;

use crate::error::{Error, Result};

/// Read `path` as text lines. Invalid UTF-8 is replaced rather than rejected,
/// `\r\n` endings are normalized, and a trailing newline does not add an
/// empty final line.
pub fn read_lines(path: &Path) -> Result<LineSequence> {
    let bytes = fs::read(path).map_err(|e| Error::from_read(path.to_path_buf(), e))?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(split_lines(&content))
}

/// Split text the way [`read_lines`] does.
pub fn split_lines(content: &str) -> LineSequence {
    content.lines().map(String::from).collect()
}
