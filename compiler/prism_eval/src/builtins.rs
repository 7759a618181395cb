//! Built-in function registry.
//!
//! A FUNCTION token names a built-in. The interpreter splits the call's
//! parameters into raw token slices, checks the count against the
//! registered arity and hands the slices over unevaluated; each built-in
//! decides how to evaluate them.

use prism_ir::Token;
use rustc_hash::FxHashMap;

use crate::print_handler::PrintHandlerImpl;
use crate::{evaluate, EvalError, EvalErrorKind, EvalResult, Value, VariableTable};

/// Signature shared by every built-in.
pub type BuiltinFn = fn(&mut CallContext<'_>, &[&[Token]]) -> EvalResult<()>;

#[derive(Copy, Clone, Debug)]
pub struct Builtin {
    /// Exact number of parameters.
    pub arity: usize,
    pub call: BuiltinFn,
}

/// Interpreter state a built-in may touch.
pub struct CallContext<'a> {
    pub variables: &'a mut VariableTable,
    pub print: &'a PrintHandlerImpl,
    /// The FUNCTION token being executed.
    pub call_site: &'a Token,
}

impl CallContext<'_> {
    /// Evaluate one parameter; an empty parameter is reported at the call site.
    pub fn evaluate(&self, tokens: &[Token]) -> EvalResult<Value> {
        evaluate(tokens, &*self.variables).map_err(|err| err.or_at(self.call_site))
    }
}

#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    entries: FxHashMap<String, Builtin>,
}

impl BuiltinRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `OUTPUT`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(
            "OUTPUT",
            Builtin {
                arity: 1,
                call: output,
            },
        );
        registry
    }

    /// Add or replace a built-in.
    pub fn register(&mut self, name: impl Into<String>, builtin: Builtin) -> Option<Builtin> {
        self.entries.insert(name.into(), builtin)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.entries.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// `OUTPUT(expr);` prints the value's display form on its own line.
fn output(cx: &mut CallContext<'_>, params: &[&[Token]]) -> EvalResult<()> {
    let [param] = params else {
        return Err(EvalError::at(
            EvalErrorKind::WrongParameterCount {
                name: cx.call_site.content.clone(),
                expected: 1,
                got: params.len(),
            },
            cx.call_site,
        ));
    };
    let value = cx.evaluate(param)?;
    cx.print.println(&value.to_string());
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
