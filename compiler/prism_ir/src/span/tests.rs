use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert!(!span.is_empty());
    assert_eq!(span.last_byte(), 19);
    assert!(Span::new(4, 4).is_empty());
    assert_eq!(Span::new(4, 4).last_byte(), 4);
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_span_display() {
    assert_eq!(Span::new(3, 7).to_string(), "3..7");
}

#[test]
fn test_line_offset_table_multiple_lines() {
    let source = "line1\nline2\nline3";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(5), 1); // '\n' belongs to the line it ends
    assert_eq!(table.line_from_offset(6), 2);
    assert_eq!(table.line_from_offset(12), 3);
}

#[test]
fn test_line_offset_table_unicode_columns() {
    let source = "αβγ\nδε";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 4), (1, 3));
    assert_eq!(table.offset_to_line_col(source, 7), (2, 1));
}

#[test]
fn test_line_text_strips_line_endings() {
    let source = "first\r\nsecond\n\nlast";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some(""));
    assert_eq!(table.line_text(source, 4), Some("last"));
    assert_eq!(table.line_text(source, 5), None);
}

#[test]
fn test_line_start_offset_zero_is_none() {
    let table = LineOffsetTable::build("test");
    assert_eq!(table.line_start_offset(0), None);
}
