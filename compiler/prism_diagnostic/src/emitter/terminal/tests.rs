use super::*;
use crate::ErrorCode;
use prism_ir::Span;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2002)
        .with_message("type mismatch: cannot apply `+` to a string")
        .with_label(Span::new(10, 15), "string operand")
        .with_note("strings can only be printed")
        .with_suggestion("print the string on its own")
}

fn render(diag: &Diagnostic, mode: ColorMode, source: Option<&str>) -> String {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, false);
        if let Some(source) = source {
            emitter = emitter.with_source(source).with_file_path("demo.prsm");
        }
        emitter.emit(diag);
        emitter.flush();
    }
    String::from_utf8(output).unwrap()
}

// Fallback (no source) tests

#[test]
fn test_terminal_emitter_no_color() {
    let text = render(&sample_diagnostic(), ColorMode::Never, None);
    assert!(text.contains("error"));
    assert!(text.contains("[E2002]"));
    assert!(text.contains("type mismatch"));
    assert!(text.contains("--> 10..15: string operand"));
    assert!(text.contains("note:"));
    assert!(text.contains("help:"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_terminal_emitter_with_color() {
    let text = render(&sample_diagnostic(), ColorMode::Always, None);
    assert!(text.contains("\x1b["));
    assert!(text.contains("E2002"));
}

#[test]
fn test_emit_summary_single_error() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

    emitter.emit_summary(1);
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("aborting due to previous error"));
    assert!(!text.contains("errors"));
}

#[test]
fn test_emit_summary_counts_errors() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

    emitter.emit_summary(0);
    emitter.emit_summary(3);
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text, "error: aborting due to 3 previous errors\n");
}

// ColorMode

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}

#[test]
fn test_color_mode_from_flag() {
    assert_eq!(ColorMode::from_flag("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_flag("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::from_flag("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::from_flag("sometimes"), None);
}

// Excerpt rendering

#[test]
fn test_excerpt_single_line() {
    // Line 1: "set x = 1;\n"     bytes 0..11
    // Line 2: "output(x + y);"   bytes 11..25, `y` at 22
    let source = "set x = 1;\noutput(x + y);";
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("undefined variable `y`")
        .with_label(Span::new(22, 23), "not assigned yet");

    let text = render(&diag, ColorMode::Never, Some(source));

    assert!(
        text.contains("--> demo.prsm:2:12"),
        "Expected location header, got:\n{text}"
    );
    assert!(text.contains("╭─"), "Expected box top, got:\n{text}");
    assert!(
        text.contains(" 2 │ output(x + y);"),
        "Expected source line, got:\n{text}"
    );
    assert!(
        text.contains("│            ^ not assigned yet"),
        "Expected underline, got:\n{text}"
    );
    assert!(text.contains("╰─"), "Expected box bottom, got:\n{text}");
    assert!(!text.contains("22..23"), "Should not contain byte offsets");
}

#[test]
fn test_excerpt_multi_char_span() {
    let source = "output(\"hi\" * 2);";
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("type mismatch")
        .with_label(Span::new(7, 11), "string operand");

    let text = render(&diag, ColorMode::Never, Some(source));
    assert!(text.contains("^^^^ string operand"), "got:\n{text}");
    assert!(text.contains("--> demo.prsm:1:8"), "got:\n{text}");
}

#[test]
fn test_excerpt_point_span_renders_one_caret() {
    let source = "output(1)";
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("expected `;`")
        .with_label(Span::new(9, 9), "");

    let text = render(&diag, ColorMode::Never, Some(source));
    assert!(text.contains("│          ^"), "got:\n{text}");
}

#[test]
fn test_excerpt_gutter_width_two_digits() {
    let mut source = String::new();
    for i in 0..12 {
        source.push_str(&format!("set v{i} = {i};\n"));
    }
    // Line 12 starts at the offset of the 12th line.
    let table = LineOffsetTable::build(&source);
    let start = table.line_start_offset(12).unwrap();
    let diag = Diagnostic::error(ErrorCode::E1007)
        .with_message("unexpected token")
        .with_label(Span::new(start, start + 3), "here");

    let text = render(&diag, ColorMode::Never, Some(&source));
    assert!(text.contains(" 12 │ set v11 = 11;"), "got:\n{text}");
    assert!(text.contains("    ╭─"), "got:\n{text}");
}

#[test]
fn test_excerpt_highlight_with_colors() {
    let source = "set x = y;";
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("undefined variable `y`")
        .with_label(Span::new(8, 9), "");

    let text = render(&diag, ColorMode::Always, Some(source));
    assert!(
        text.contains("set x = \x1b[4;31my\x1b[0m;"),
        "Expected highlighted span, got:\n{text:?}"
    );
}
