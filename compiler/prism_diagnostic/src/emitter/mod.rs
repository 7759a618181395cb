//! Diagnostic emitters.
//!
//! Only a terminal emitter exists: Prism reports to a human at a console.
//! Emitters implement [`DiagnosticEmitter`] so the CLI can swap the sink
//! (stderr in production, a byte buffer in tests).

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit the closing "aborting due to" line.
    fn emit_summary(&mut self, error_count: usize);
}
