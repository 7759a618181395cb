//! Prism eval - expression evaluation and program execution.
//!
//! ```
//! use prism_eval::{buffer_handler, Interpreter};
//! use prism_lexif::{standard_rules, tokenize};
//!
//! let tokens = tokenize("set x = 2; repeat(3) { set x = x * 2; } output(x);", &standard_rules().unwrap()).unwrap();
//! let print = buffer_handler();
//! let mut interpreter = Interpreter::new(&tokens).with_print_handler(print.clone());
//! interpreter.run().unwrap();
//! assert_eq!(print.output(), "16\n");
//! ```

mod builtins;
mod environment;
mod errors;
mod evaluator;
mod interpreter;
mod loop_frame;
mod operators;
mod print_handler;
mod value;

pub use builtins::{Builtin, BuiltinFn, BuiltinRegistry, CallContext};
pub use environment::VariableTable;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use evaluator::evaluate;
pub use interpreter::Interpreter;
pub use loop_frame::{LoopFrame, LoopResume, LoopStack, LoopState};
pub use operators::apply_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::Value;
