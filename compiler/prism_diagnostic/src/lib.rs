//! Diagnostic system for Prism error reporting.
//!
//! Every failure raised by the rule compiler, tokenizer, evaluator or
//! interpreter is converted into a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability (`prism explain E2001`)
//! - a message saying what went wrong
//! - a primary label pointing at the offending token
//!
//! Rendering is the job of the [`emitter`] module; phases never print.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
