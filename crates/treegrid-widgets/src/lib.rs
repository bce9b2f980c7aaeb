#![forbid(unsafe_code)]

//! Headless hierarchical tree-table widget.
//!
//! [`TreeTable`] takes a flat node list and projects it into the ordered row
//! list a rendering backend should draw: filter → sort → depth-first walk
//! gated by per-node expand state, each row annotated with its depth and
//! whether it has children. Selection, row actions, and hover-driven
//! ancestor/descendant highlighting live here too; actually painting rows is
//! the backend's job.

pub mod projection;
pub mod stateful;
pub mod tree_table;

pub use projection::{DisplayRow, SortKey, project, search_matches};
pub use stateful::{StateKey, Stateful};
pub use tree_table::{
    CellSource, Column, ColumnWidth, RowAction, RowEvent, TreeTable, TreeTableState,
};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthStr, UnicodeWidthChar};

/// Display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fit cell text into a column-width budget.
///
/// Returns the text unchanged if it fits; otherwise truncates on grapheme
/// cluster boundaries and appends `…`. A zero budget yields an empty string.
#[must_use]
pub fn fit_cell(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let ellipsis_width = UnicodeWidthChar::width('…').unwrap_or(1);
    if width < ellipsis_width {
        return String::new();
    }
    let budget = width - ellipsis_width;
    let mut out = String::new();
    let mut used = 0;
    for grapheme in s.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push('…');
    out
}
