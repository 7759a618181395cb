//! Error codes for all Prism diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that raised it. Used for `prism explain` lookups.

use std::fmt;

/// Error codes for all Prism diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexical errors
/// - E1xxx: Syntax errors
/// - E2xxx: Semantic (runtime) errors
/// - E3xxx: Rule file configuration errors
/// - E9xxx: Internal / host errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unfinished token at end of input
    E0001,

    // Syntax Errors (E1xxx)
    /// Expected `;`
    E1001,
    /// Expected `(`
    E1002,
    /// Expected `)`
    E1003,
    /// Expected `{`
    E1004,
    /// Expected `}`
    E1005,
    /// Mismatched parentheses
    E1006,
    /// Unexpected token
    E1007,
    /// Wrong parameter count
    E1008,
    /// Expected variable name
    E1009,
    /// Expected `=`
    E1010,
    /// Malformed expression
    E1011,
    /// Unexpected end of input
    E1012,

    // Semantic Errors (E2xxx)
    /// Undefined variable
    E2001,
    /// Type mismatch
    E2002,
    /// Missing expression
    E2003,
    /// Division by zero
    E2004,
    /// Integer overflow
    E2005,
    /// Unknown function
    E2006,
    /// Invalid literal
    E2007,

    // Rule File Errors (E3xxx)
    /// Unknown section header
    E3001,
    /// Line outside of any section
    E3002,
    /// Malformed match rule
    E3003,
    /// Unknown arrow
    E3004,
    /// Unknown match expression
    E3005,
    /// Invalid regular expression
    E3006,
    /// Unknown token class
    E3007,
    /// Unknown token kind
    E3008,
    /// Malformed constant
    E3009,
    /// Malformed group rule
    E3010,
    /// Missing quoted string
    E3011,

    // Internal Errors (E9xxx)
    /// Host error (I/O, invalid input file)
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::E3008,
        ErrorCode::E3009,
        ErrorCode::E3010,
        ErrorCode::E3011,
        ErrorCode::E9001,
    ];

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Numeric part of the code, as carried by the error-reporting contract.
    pub fn number(&self) -> u16 {
        self.as_str()[1..].parse().unwrap_or(0)
    }

    /// One-line explanation used by `prism explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "the source ended while a token was still being read",
            ErrorCode::E1001 => "a statement is missing its terminating `;`",
            ErrorCode::E1002 => "a call or loop header is missing its opening `(`",
            ErrorCode::E1003 => "a call or loop header is missing its closing `)`",
            ErrorCode::E1004 => "a loop is missing the `{` that opens its body",
            ErrorCode::E1005 => "a loop body is missing its closing `}`",
            ErrorCode::E1006 => "an expression has a `(` or `)` without a partner",
            ErrorCode::E1007 => "a token appeared where a statement was expected",
            ErrorCode::E1008 => "a built-in was called with the wrong number of parameters",
            ErrorCode::E1009 => "an assignment does not start with a variable name",
            ErrorCode::E1010 => "an assignment is missing its `=`",
            ErrorCode::E1011 => "an expression has operators without enough operands",
            ErrorCode::E1012 => "the program ended in the middle of a statement",
            ErrorCode::E2001 => "a variable was read before anything was assigned to it",
            ErrorCode::E2002 => "an operator was applied to a value of the wrong type",
            ErrorCode::E2003 => "an expression was expected but nothing was written",
            ErrorCode::E2004 => "a division or modulo had a zero divisor",
            ErrorCode::E2005 => "an integer result does not fit in 64 bits",
            ErrorCode::E2006 => "a function token names no registered built-in",
            ErrorCode::E2007 => "a literal's text cannot be read as a value",
            ErrorCode::E3001 => "a rule file header is not #CONSTANTS, #RULES or #GROUPS",
            ErrorCode::E3002 => "a rule file line appears before any section header",
            ErrorCode::E3003 => "a match rule line is not `CLASS SUBCLASS <arrow> <match>`",
            ErrorCode::E3004 => "a match rule arrow is neither `->` nor `=>`",
            ErrorCode::E3005 => "a match expression is not is/between/matches/endswith",
            ErrorCode::E3006 => "a `matches` pattern is not a valid regular expression",
            ErrorCode::E3007 => "a rule names a token class that does not exist",
            ErrorCode::E3008 => "a rule names a keyword or loop subclass nothing can execute",
            ErrorCode::E3009 => "a constant line is not `NAME -> replacement`",
            ErrorCode::E3010 => "a group line is not `CLASS SUBCLASS -> A B + C D`",
            ErrorCode::E3011 => "a match expression is missing a quoted string",
            ErrorCode::E9001 => "the input could not be loaded",
        }
    }

    /// Check if this is a lexical error (E0xxx range).
    pub fn is_lexical_error(&self) -> bool {
        matches!(self, ErrorCode::E0001)
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a semantic error (E2xxx range).
    pub fn is_semantic_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a rule file configuration error (E3xxx range).
    pub fn is_config_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Check if this is an internal / host error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
