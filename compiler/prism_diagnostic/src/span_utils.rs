//! Span utility functions for diagnostic rendering.
//!
//! The line table itself lives in `prism_ir` because the tokenizer needs it
//! to stamp line numbers on tokens; this module adds the lookups emitters use.

use prism_ir::Span;

pub use prism_ir::LineOffsetTable;

/// 1-based line and column of a span's start, plus the column one past its
/// inclusive end on the same line.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SpanLocation {
    pub line: u32,
    pub start_col: u32,
    /// Exclusive end column, clamped to the end of the start line.
    pub end_col: u32,
}

/// Locate a span in `source`.
///
/// Empty spans and spans that run past the end of their first line still
/// cover at least one column so there is always something to underline.
pub fn locate(table: &LineOffsetTable, source: &str, span: Span) -> SpanLocation {
    let (line, start_col) = table.offset_to_line_col(source, span.start);
    let line_len = table
        .line_text(source, line)
        .map_or(0, |text| u32::try_from(text.chars().count()).unwrap_or(u32::MAX - 1));

    let end_col = if span.is_empty() {
        start_col + 1
    } else {
        let (end_line, end_col) = table.offset_to_line_col(source, span.last_byte());
        if end_line == line {
            end_col + 1
        } else {
            line_len + 1
        }
    };

    SpanLocation {
        line,
        start_col,
        end_col: end_col.max(start_col + 1),
    }
}

#[cfg(test)]
mod tests;
