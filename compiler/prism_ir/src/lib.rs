//! Prism IR - shared token and span types.
//!
//! The token list is the executable representation of a Prism program: there
//! is no syntax tree. Every later stage (rule engine, evaluator, interpreter,
//! diagnostics) speaks in terms of the types defined here.

mod op;
mod span;
mod token;

pub use op::BinaryOp;
pub use span::{LineOffsetTable, Span};
pub use token::{Delimiter, Keyword, LiteralKind, LoopKind, Token, TokenClass, TokenKind};
