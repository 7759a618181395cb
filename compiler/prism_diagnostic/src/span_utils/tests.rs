use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_locate_single_line_span() {
    let source = "set x = 1;\noutput(x + y);";
    let table = LineOffsetTable::build(source);
    // "y" at byte 22
    let loc = locate(&table, source, Span::new(22, 23));
    assert_eq!(
        loc,
        SpanLocation {
            line: 2,
            start_col: 12,
            end_col: 13
        }
    );
}

#[test]
fn test_locate_empty_span_covers_one_column() {
    let source = "output(1)";
    let table = LineOffsetTable::build(source);
    let loc = locate(&table, source, Span::new(9, 9));
    assert_eq!(loc.line, 1);
    assert_eq!(loc.end_col, loc.start_col + 1);
}

#[test]
fn test_locate_span_crossing_lines_is_clamped() {
    let source = "\"ab\ncd\"";
    let table = LineOffsetTable::build(source);
    let loc = locate(&table, source, Span::new(0, 7));
    assert_eq!(loc.line, 1);
    assert_eq!(loc.start_col, 1);
    assert_eq!(loc.end_col, 4);
}
