//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! When the emitter knows the source text, each label is rendered as a boxed
//! excerpt with the labeled span underlined:
//!
//! ```text
//! error[E2001]: undefined variable `y`
//!   --> demo.prsm:2:12
//!    ╭─
//!  2 │ output(x + y);
//!    │            ^ not assigned yet
//!    ╰─
//! ```
//!
//! Without source text, labels fall back to raw byte spans.

use std::io::{self, Write};

use crate::span_utils::{locate, LineOffsetTable, SpanLocation};
use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const HIGHLIGHT: &str = "\x1b[4;31m"; // Underlined red
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color=` value.
    pub fn from_flag(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Source text attached to an emitter for excerpt rendering.
struct SourceView<'src> {
    text: &'src str,
    table: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceView<'src>>,
    file_path: Option<String>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Attach the source text so labels render as excerpts.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(SourceView {
            text: source,
            table: LineOffsetTable::build(source),
        });
        self
    }

    /// Path shown in the `-->` location header.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        self.write_colored(&format!("[{code}]"), colors::BOLD);
    }

    fn write_label_message(&mut self, label: &Label) {
        self.write_colored(&label.message, colors::ERROR);
    }

    /// Fallback for emitters without source: `--> 4..9: message`.
    fn emit_raw_labels(&mut self, diagnostic: &Diagnostic) {
        for label in &diagnostic.labels {
            let _ = write!(self.writer, "  --> {:?}: ", label.span);
            self.write_label_message(label);
            let _ = writeln!(self.writer);
        }
    }

    fn emit_excerpts(&mut self, diagnostic: &Diagnostic, view: &SourceView<'_>) {
        let located: Vec<(&Label, SpanLocation)> = diagnostic
            .labels
            .iter()
            .map(|label| (label, locate(&view.table, view.text, label.span)))
            .collect();

        if let Some(span) = diagnostic.primary_span() {
            let loc = locate(&view.table, view.text, span);
            let path = self.file_path.as_deref().unwrap_or("<input>");
            let _ = writeln!(
                self.writer,
                "  --> {path}:{}:{}",
                loc.line, loc.start_col
            );
        }

        let width = located
            .iter()
            .map(|(_, loc)| loc.line.to_string().len())
            .max()
            .unwrap_or(1);
        let pad = " ".repeat(width);

        let _ = writeln!(self.writer, " {pad} ╭─");
        for (label, loc) in &located {
            let text = view.table.line_text(view.text, loc.line).unwrap_or("");
            let _ = write!(self.writer, " {:>width$} │ ", loc.line);
            self.write_highlighted_line(text, *loc);
            let _ = writeln!(self.writer);

            let lead = " ".repeat((loc.start_col - 1) as usize);
            let carets = "^".repeat((loc.end_col - loc.start_col) as usize);
            let _ = write!(self.writer, " {pad} │ {lead}");
            self.write_colored(&carets, colors::ERROR);
            if !label.message.is_empty() {
                let _ = write!(self.writer, " ");
                self.write_label_message(label);
            }
            let _ = writeln!(self.writer);
        }
        let _ = writeln!(self.writer, " {pad} ╰─");
    }

    /// Write one source line, underlining the located columns when colored.
    fn write_highlighted_line(&mut self, text: &str, loc: SpanLocation) {
        if !self.colors {
            let _ = write!(self.writer, "{text}");
            return;
        }
        let start = (loc.start_col - 1) as usize;
        let len = (loc.end_col - loc.start_col) as usize;
        let before: String = text.chars().take(start).collect();
        let marked: String = text.chars().skip(start).take(len).collect();
        let after: String = text.chars().skip(start + len).collect();
        let _ = write!(
            self.writer,
            "{before}{}{marked}{}{after}",
            colors::HIGHLIGHT,
            colors::RESET
        );
    }
}

impl<'src> TerminalEmitter<'src, io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if let Some(view) = self.source.take() {
            if !diagnostic.labels.is_empty() {
                self.emit_excerpts(diagnostic, &view);
            }
            self.source = Some(view);
        } else {
            self.emit_raw_labels(diagnostic);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(self.writer, ": aborting due to {error_count} previous errors");
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
