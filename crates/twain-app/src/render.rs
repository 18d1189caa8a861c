// Plain-text side-by-side rendering of an aligned view.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use twain_core::{AlignedView, RowKind};

const DIVIDER: &str = " │ ";

/// Truncate `s` to at most `max` display columns, measured the same way as
/// the column width so emoji presentation sequences never overflow.
fn truncate_to_width(s: &str, max: usize) -> &str {
    if s.width() <= max {
        return s;
    }
    for (idx, ch) in s.char_indices() {
        if s[..idx + ch.len_utf8()].width() > max {
            return &s[..idx];
        }
    }
    s
}

fn marks(kind: RowKind) -> (char, char) {
    match kind {
        RowKind::Context => (' ', ' '),
        RowKind::Deleted => ('-', ' '),
        RowKind::Added => (' ', '+'),
        RowKind::Replaced => ('-', '+'),
    }
}

/// Render every row as `<mark> <from> │ <mark> <to>`. The from column is as
/// wide as its widest line, capped at `column_width`.
pub fn render_text(view: &AlignedView, column_width: usize) -> String {
    let from_width = view
        .from_aligned
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .min(column_width);

    let mut out = String::new();
    for (i, (left, right)) in view.from_aligned.iter().zip(&view.to_aligned).enumerate() {
        let (from_mark, to_mark) = marks(view.row_kind(i + 1));
        let left = truncate_to_width(left, from_width);
        let pad = from_width.saturating_sub(left.width());
        let _ = write!(out, "{from_mark} {left}{:pad$}{DIVIDER}{to_mark} {right}", "");
        // No trailing whitespace on rows whose to side is empty; a to line
        // keeps its own trailing spaces.
        if right.is_empty() {
            let trimmed = out.trim_end_matches(' ').len();
            out.truncate(trimmed);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use twain_core::{AlignedChanges, AlignedGaps, AlignedRow};

    fn view(from: &[&str], to: &[&str], additions: &[usize], deletions: &[usize]) -> AlignedView {
        AlignedView {
            from_aligned: from.iter().map(|s| s.to_string()).collect(),
            to_aligned: to.iter().map(|s| s.to_string()).collect(),
            changes: AlignedChanges {
                additions: additions.iter().map(|&line| AlignedRow { line }).collect(),
                deletions: deletions.iter().map(|&line| AlignedRow { line }).collect(),
            },
            gaps: AlignedGaps::default(),
        }
    }

    #[test]
    fn marks_and_padding() {
        let v = view(&["a", "bb", "c"], &["a", "x", "c"], &[2], &[2]);
        let text = render_text(&v, 60);
        assert_eq!(text, "  a  │   a\n- bb │ + x\n  c  │   c\n");
    }

    #[test]
    fn gap_rows_render_blank() {
        let v = view(&["a", "b"], &["a", ""], &[], &[2]);
        let text = render_text(&v, 60);
        assert_eq!(text, "  a │   a\n- b │\n");
    }

    #[test]
    fn wide_lines_are_truncated() {
        let v = view(&["abcdef"], &["abcdef"], &[], &[]);
        assert_eq!(render_text(&v, 3), "  abc │   abcdef\n");
    }

    #[test]
    fn truncation_respects_double_width_chars() {
        assert_eq!(truncate_to_width("한글abc", 3), "한");
        assert_eq!(truncate_to_width("한글abc", 4), "한글");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn emoji_presentation_selector_does_not_overflow_column() {
        // "❤" alone is one column; with VS16 the pair takes two.
        let heart = "a\u{2764}\u{FE0F}";
        assert_eq!(truncate_to_width(heart, 2), "a\u{2764}");
        let v = view(&[heart], &[heart], &[], &[]);
        assert_eq!(render_text(&v, 2), format!("  a\u{2764} │   {heart}\n"));
    }

    #[test]
    fn trailing_spaces_of_to_line_are_kept() {
        let v = view(&["a", "b"], &["a", "x  "], &[2], &[2]);
        assert_eq!(render_text(&v, 60), "  a │   a\n- b │ + x  \n");
    }
}
