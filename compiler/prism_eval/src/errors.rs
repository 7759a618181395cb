//! Program errors.
//!
//! Every failure while running a program is an [`EvalError`]: a typed
//! [`EvalErrorKind`] plus the span and line of the token to blame. Errors
//! are unrecoverable for the run; the interpreter stops at the first one.

use prism_diagnostic::{Diagnostic, ErrorCode};
use prism_ir::{Span, Token};
use thiserror::Error;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Lexical
    #[error("unfinished token `{content}`")]
    UnfinishedToken { content: String },

    // Syntax
    #[error("expected `{expected}`")]
    MissingDelimiter { expected: char },
    #[error("mismatched parentheses: `{unmatched}` has no partner")]
    MismatchedParen { unmatched: char },
    #[error("`{name}` expects {expected} parameter(s), got {got}")]
    WrongParameterCount {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("unexpected token `{found}`")]
    UnexpectedToken { found: String },
    #[error("expected a variable name, found `{found}`")]
    ExpectedVariable { found: String },
    #[error("expected `=` after the variable name, found `{found}`")]
    ExpectedAssign { found: String },
    #[error("malformed expression")]
    MalformedExpression,
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: &'static str },

    // Semantic
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing expression")]
    MissingExpression,
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in `{op}`")]
    IntegerOverflow { op: &'static str },
    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },
    #[error("invalid {kind} literal `{text}`")]
    InvalidLiteral { kind: &'static str, text: String },
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnfinishedToken { .. } => ErrorCode::E0001,
            Self::MissingDelimiter { expected } => match expected {
                ';' => ErrorCode::E1001,
                '(' => ErrorCode::E1002,
                ')' => ErrorCode::E1003,
                '{' => ErrorCode::E1004,
                '}' => ErrorCode::E1005,
                _ => ErrorCode::E1007,
            },
            Self::MismatchedParen { .. } => ErrorCode::E1006,
            Self::UnexpectedToken { .. } => ErrorCode::E1007,
            Self::WrongParameterCount { .. } => ErrorCode::E1008,
            Self::ExpectedVariable { .. } => ErrorCode::E1009,
            Self::ExpectedAssign { .. } => ErrorCode::E1010,
            Self::MalformedExpression => ErrorCode::E1011,
            Self::UnexpectedEndOfInput { .. } => ErrorCode::E1012,
            Self::UndefinedVariable { .. } => ErrorCode::E2001,
            Self::TypeMismatch { .. } => ErrorCode::E2002,
            Self::MissingExpression => ErrorCode::E2003,
            Self::DivisionByZero => ErrorCode::E2004,
            Self::IntegerOverflow { .. } => ErrorCode::E2005,
            Self::UnknownFunction { .. } => ErrorCode::E2006,
            Self::InvalidLiteral { .. } => ErrorCode::E2007,
        }
    }

    /// Short text for the label under the offending span.
    fn label(&self) -> &'static str {
        match self {
            Self::UnfinishedToken { .. } => "no rule accepts this text",
            Self::MissingDelimiter { .. } => "expected here",
            Self::MismatchedParen { .. } => "unmatched",
            Self::WrongParameterCount { .. } => "wrong number of parameters",
            Self::UnexpectedToken { .. } => "not valid here",
            Self::ExpectedVariable { .. } => "expected a variable name",
            Self::ExpectedAssign { .. } => "expected `=`",
            Self::MalformedExpression => "operator or operand missing",
            Self::UnexpectedEndOfInput { .. } => "input ends here",
            Self::UndefinedVariable { .. } => "not assigned yet",
            Self::TypeMismatch { .. } => "wrong type",
            Self::MissingExpression => "expression expected",
            Self::DivisionByZero => "divisor is zero",
            Self::IntegerOverflow { .. } => "result does not fit in 64 bits",
            Self::UnknownFunction { .. } => "no such built-in",
            Self::InvalidLiteral { .. } => "cannot be read as a value",
        }
    }
}

/// Evaluation error with the location of the token to blame.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} (line {line})")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
    /// 1-based line; 0 while the error has no location yet.
    pub line: u32,
}

impl EvalError {
    #[cold]
    pub fn new(kind: EvalErrorKind, span: Span, line: u32) -> Self {
        EvalError { kind, span, line }
    }

    /// Error located at `token`.
    #[cold]
    pub fn at(kind: EvalErrorKind, token: &Token) -> Self {
        Self::new(kind, token.span, token.line)
    }

    /// Error with no location, for callers to place with [`or_at`](Self::or_at).
    #[cold]
    pub fn unplaced(kind: EvalErrorKind) -> Self {
        Self::new(kind, Span::DUMMY, 0)
    }

    /// Error pointing just past `token`, for "expected X after this".
    #[cold]
    pub fn after(kind: EvalErrorKind, token: &Token) -> Self {
        Self::new(kind, Span::new(token.span.end, token.span.end), token.line)
    }

    pub fn is_placed(&self) -> bool {
        self.line != 0
    }

    /// Locate an unplaced error at `token`; placed errors are unchanged.
    #[must_use]
    pub fn or_at(self, token: &Token) -> Self {
        if self.is_placed() {
            self
        } else {
            Self::at(self.kind, token)
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.kind.label());

        match &self.kind {
            EvalErrorKind::UnfinishedToken { .. } => {
                diag = diag
                    .with_note("the program was not run")
                    .with_suggestion("check that the rule file covers every character used");
            }
            EvalErrorKind::UndefinedVariable { name } => {
                diag = diag.with_suggestion(format!("assign it first: `set {name} = ...;`"));
            }
            EvalErrorKind::TypeMismatch { .. } => {
                diag = diag.with_note("strings can be printed or assigned but not used as operands");
            }
            _ => {}
        }
        diag
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
