use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("undefined variable `count`")
        .with_label(Span::new(7, 12), "not assigned yet")
        .with_note("variables exist once `set` runs");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.labels.len(), 1);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.primary_span(), Some(Span::new(7, 12)));
}

#[test]
fn test_primary_span_absent() {
    let diag = Diagnostic::error(ErrorCode::E9001).with_message("nothing to point at");
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("expected `;`")
        .with_label(Span::new(3, 4), "statement ends here")
        .with_suggestion("add `;` after the statement");

    let text = diag.to_string();
    assert!(text.starts_with("error [E1001]: expected `;`"));
    assert!(text.contains("3..4"));
    assert!(text.contains("help: add `;`"));
}
