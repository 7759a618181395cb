//! Rule file configuration errors.
//!
//! Raised by [`compile_rules`](crate::compile_rules) before any source is
//! tokenized. Every variant carries the 1-based line of the rule file.

use prism_diagnostic::{Diagnostic, ErrorCode};
use prism_ir::{LineOffsetTable, Span};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("line {line}: unknown section header `{header}`")]
    UnknownSection { line: u32, header: String },

    #[error("line {line}: rule text before any section header")]
    OutsideSection { line: u32 },

    #[error("line {line}: malformed rule `{text}`")]
    MalformedRule { line: u32, text: String },

    #[error("line {line}: unknown arrow `{arrow}`, expected `->` or `=>`")]
    UnknownArrow { line: u32, arrow: String },

    #[error("line {line}: unknown match expression `{expr}`")]
    UnknownMatch { line: u32, expr: String },

    #[error("line {line}: invalid pattern `{pattern}`: {message}")]
    InvalidRegex {
        line: u32,
        pattern: String,
        message: String,
    },

    #[error("line {line}: unknown token class `{class}`")]
    UnknownClass { line: u32, class: String },

    #[error("line {line}: `{class} {subclass}` is not a token kind the interpreter can run")]
    UnknownKind {
        line: u32,
        class: String,
        subclass: String,
    },

    #[error("line {line}: malformed constant, expected `NAME -> replacement`")]
    MalformedConstant { line: u32 },

    #[error("line {line}: malformed group `{text}`")]
    MalformedGroup { line: u32, text: String },

    #[error("line {line}: `{keyword}` needs {expected} quoted string(s)")]
    MissingQuoted {
        line: u32,
        keyword: &'static str,
        expected: usize,
    },
}

impl RuleError {
    /// 1-based rule file line the error was found on.
    pub fn line(&self) -> u32 {
        match self {
            RuleError::UnknownSection { line, .. }
            | RuleError::OutsideSection { line }
            | RuleError::MalformedRule { line, .. }
            | RuleError::UnknownArrow { line, .. }
            | RuleError::UnknownMatch { line, .. }
            | RuleError::InvalidRegex { line, .. }
            | RuleError::UnknownClass { line, .. }
            | RuleError::UnknownKind { line, .. }
            | RuleError::MalformedConstant { line }
            | RuleError::MalformedGroup { line, .. }
            | RuleError::MissingQuoted { line, .. } => *line,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RuleError::UnknownSection { .. } => ErrorCode::E3001,
            RuleError::OutsideSection { .. } => ErrorCode::E3002,
            RuleError::MalformedRule { .. } => ErrorCode::E3003,
            RuleError::UnknownArrow { .. } => ErrorCode::E3004,
            RuleError::UnknownMatch { .. } => ErrorCode::E3005,
            RuleError::InvalidRegex { .. } => ErrorCode::E3006,
            RuleError::UnknownClass { .. } => ErrorCode::E3007,
            RuleError::UnknownKind { .. } => ErrorCode::E3008,
            RuleError::MalformedConstant { .. } => ErrorCode::E3009,
            RuleError::MalformedGroup { .. } => ErrorCode::E3010,
            RuleError::MissingQuoted { .. } => ErrorCode::E3011,
        }
    }

    /// Convert to a diagnostic whose label covers the offending rule line.
    ///
    /// `rule_text` must be the text the error was raised for; the label span
    /// indexes into it.
    #[cold]
    pub fn to_diagnostic(&self, rule_text: &str) -> Diagnostic {
        let table = LineOffsetTable::build(rule_text);
        let line = self.line();
        let span = match (
            table.line_start_offset(line),
            table.line_text(rule_text, line),
        ) {
            (Some(start), Some(text)) => {
                let len = u32::try_from(text.len()).unwrap_or(0);
                Span::new(start, start + len)
            }
            _ => Span::DUMMY,
        };

        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(span, "in this rule")
            .with_note("rule files are checked before any program runs")
    }
}
