//! Loading, tokenizing and running programs.

use std::io;
use std::path::Path;
use std::time::Instant;

use prism_diagnostic::{Diagnostic, ErrorCode};
use prism_eval::{EvalError, Interpreter, SharedPrintHandler, VariableTable};
use prism_ir::Token;
use prism_lexif::{compile_rules, tokenize, CompiledRules, RuleError, TokenizeError, STANDARD_RULES};
use thiserror::Error;

/// Required extension for rule files.
pub const RULES_EXTENSION: &str = "lexif";

/// Rule file picked up from the working directory when `--rules` is absent.
pub const DEFAULT_RULES_FILE: &str = "rules.lexif";

/// Origin shown for the bundled rule set.
pub const STANDARD_RULES_NAME: &str = "<standard rules>";

/// Anything that can stop a command.
#[derive(Debug, Error)]
pub enum PrismError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("rule file `{path}` does not have the `.lexif` extension")]
    RuleExtension { path: String },

    #[error(transparent)]
    Rules(#[from] RuleError),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl PrismError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } | Self::RuleExtension { .. } | Self::Tokenize(_) => ErrorCode::E9001,
            Self::Rules(err) => err.code(),
            Self::Eval(err) => err.code(),
        }
    }

    /// Build the diagnostic. `rule_text` is only read for rule errors, whose
    /// labels point into the rule file.
    #[cold]
    pub fn to_diagnostic(&self, rule_text: &str) -> Diagnostic {
        match self {
            Self::Rules(err) => err.to_diagnostic(rule_text),
            Self::Eval(err) => err.to_diagnostic(),
            Self::RuleExtension { .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_suggestion("rename the file so it ends in `.lexif`"),
            Self::Io { .. } | Self::Tokenize(_) => {
                Diagnostic::error(self.code()).with_message(self.to_string())
            }
        }
    }
}

/// Rule text and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSource {
    /// File path, or [`STANDARD_RULES_NAME`].
    pub origin: String,
    pub text: String,
}

impl RuleSource {
    pub fn standard() -> Self {
        RuleSource {
            origin: STANDARD_RULES_NAME.to_owned(),
            text: STANDARD_RULES.to_owned(),
        }
    }

    pub fn from_path(path: &str) -> Result<Self, PrismError> {
        check_rules_extension(path)?;
        Ok(RuleSource {
            origin: path.to_owned(),
            text: read_source(path)?,
        })
    }

    /// The explicit rule file if given, else [`DEFAULT_RULES_FILE`] when it
    /// exists, else the standard rules.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, PrismError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None if Path::new(DEFAULT_RULES_FILE).is_file() => Self::from_path(DEFAULT_RULES_FILE),
            None => Ok(Self::standard()),
        }
    }

    pub fn compile(&self) -> Result<CompiledRules, PrismError> {
        Ok(compile_rules(&self.text)?)
    }
}

pub fn check_rules_extension(path: &str) -> Result<(), PrismError> {
    let has_extension = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RULES_EXTENSION));
    if has_extension {
        Ok(())
    } else {
        Err(PrismError::RuleExtension {
            path: path.to_owned(),
        })
    }
}

pub fn read_source(path: &str) -> Result<String, PrismError> {
    std::fs::read_to_string(path).map_err(|source| PrismError::Io {
        path: path.to_owned(),
        source,
    })
}

pub fn lex_source(source: &str, rules: &CompiledRules) -> Result<Vec<Token>, PrismError> {
    Ok(tokenize(source, rules)?)
}

/// Tokenize and run `source`, returning the final variable table.
#[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
pub fn run_source(
    source: &str,
    rules: &CompiledRules,
    print: SharedPrintHandler,
) -> Result<VariableTable, PrismError> {
    let start = Instant::now();
    let tokens = tokenize(source, rules)?;
    let mut interpreter = Interpreter::new(&tokens).with_print_handler(print);
    interpreter.run()?;
    tracing::info!(
        elapsed = ?start.elapsed(),
        tokens = tokens.len(),
        "program finished"
    );
    Ok(interpreter.into_variables())
}
