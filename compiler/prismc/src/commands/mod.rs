//! Command handlers for the `prism` CLI.
//!
//! Each handler returns `true` on success; `main` turns `false` into exit
//! code 1. Shared option parsing and error reporting live here.

use std::io::IsTerminal;

use prism_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use prism_diagnostic::Diagnostic;

use crate::{PrismError, RuleSource};

mod explain;
mod lex;
mod rules;
mod run;

pub use explain::explain_error;
pub use lex::lex_file;
pub use rules::check_rules_file;
pub use run::run_file;

/// Options shared by `run` and `lex`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// `--rules=<file.lexif>`
    pub rules: Option<String>,
    /// `--color=auto|always|never`
    pub color: ColorMode,
    /// `--show-vars`: print the variable table after a successful run.
    pub show_vars: bool,
    /// `--quiet`: discard program output.
    pub quiet: bool,
}

/// Parse `<file> [options]`, in any order.
///
/// Returns the file path and options, or a message for the user.
pub fn parse_run_args(args: &[String]) -> Result<(String, RunOptions), String> {
    let mut options = RunOptions::default();
    let mut path = None;

    for arg in args {
        if let Some(rules) = arg.strip_prefix("--rules=") {
            if rules.is_empty() {
                return Err("`--rules=` needs a file path".to_owned());
            }
            options.rules = Some(rules.to_owned());
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            options.color = ColorMode::from_flag(mode)
                .ok_or_else(|| format!("unknown color mode '{mode}' (expected auto, always or never)"))?;
        } else if arg == "--show-vars" {
            options.show_vars = true;
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }

    path.map(|path| (path, options))
        .ok_or_else(|| "missing file path".to_owned())
}

/// Render one diagnostic to stderr.
///
/// `source` is `(display path, text)` of the file the labels point into.
pub(crate) fn report(diagnostic: &Diagnostic, source: Option<(&str, &str)>, color: ColorMode) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(color, is_tty);
    if let Some((path, text)) = source {
        emitter = emitter.with_source(text).with_file_path(path);
    }
    emitter.emit(diagnostic);
    emitter.emit_summary(1);
    emitter.flush();
}

/// Report a pipeline error against the file it belongs to.
pub(crate) fn report_error(
    err: &PrismError,
    program: Option<(&str, &str)>,
    rules: Option<&RuleSource>,
    color: ColorMode,
) {
    let rule_text = rules.map_or("", |r| r.text.as_str());
    let diagnostic = err.to_diagnostic(rule_text);
    let source = match err {
        PrismError::Rules(_) => rules.map(|r| (r.origin.as_str(), r.text.as_str())),
        PrismError::Eval(_) => program,
        PrismError::Io { .. } | PrismError::RuleExtension { .. } | PrismError::Tokenize(_) => {
            None
        }
    };
    report(&diagnostic, source, color);
}
