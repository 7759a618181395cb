//! Cursor-driven interpreter.
//!
//! The token list is executed in place. A cursor walks the stream, one
//! statement per [`Interpreter::step`], and loops are implemented by
//! rewinding the cursor to the start of a body whenever it reaches the `}`
//! recorded in the innermost [`LoopFrame`]. Expressions are sliced out of
//! the stream and handed to [`evaluate`].

use std::ops::Range;

use prism_ir::{Delimiter, Keyword, LoopKind, Token, TokenKind};

use crate::builtins::{BuiltinRegistry, CallContext};
use crate::loop_frame::{LoopFrame, LoopStack, LoopState};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::{evaluate, EvalError, EvalErrorKind, EvalResult, VariableTable};

/// Executes one token stream.
///
/// The interpreter owns all run state: the variable table and the loop
/// stack start empty and live until the interpreter is dropped.
pub struct Interpreter<'t> {
    tokens: &'t [Token],
    /// Index of the next token to dispatch.
    cursor: usize,
    loops: LoopStack,
    variables: VariableTable,
    builtins: BuiltinRegistry,
    print: SharedPrintHandler,
}

impl<'t> Interpreter<'t> {
    /// Interpreter printing to stdout with the standard built-ins.
    pub fn new(tokens: &'t [Token]) -> Self {
        Interpreter {
            tokens,
            cursor: 0,
            loops: LoopStack::new(),
            variables: VariableTable::new(),
            builtins: BuiltinRegistry::standard(),
            print: stdout_handler(),
        }
    }

    #[must_use]
    pub fn with_print_handler(mut self, print: SharedPrintHandler) -> Self {
        self.print = print;
        self
    }

    #[must_use]
    pub fn with_builtins(mut self, builtins: BuiltinRegistry) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn into_variables(self) -> VariableTable {
        self.variables
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn loop_depth(&self) -> usize {
        self.loops.depth()
    }

    /// Run the program to completion.
    ///
    /// A stream containing an ERROR token is rejected before any statement
    /// executes: an unfinished token is a lexical error, any other ERROR
    /// subclass declared by the rules is an unexpected token. Otherwise
    /// execution stops at the first error.
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn run(&mut self) -> EvalResult<()> {
        if let Some(bad) = self.tokens.iter().find(|t| t.is_error()) {
            let content = bad.content.clone();
            let kind = match &bad.kind {
                TokenKind::Error(subclass) if subclass == TokenKind::UNFINISHED_TOKEN => {
                    EvalErrorKind::UnfinishedToken { content }
                }
                _ => EvalErrorKind::UnexpectedToken { found: content },
            };
            return Err(EvalError::at(kind, bad));
        }
        while self.step()? {}
        tracing::debug!(variables = self.variables.len(), "run finished");
        Ok(())
    }

    /// Execute one statement, or one loop continuation check.
    ///
    /// Returns `false` once the end of the stream is reached.
    pub fn step(&mut self) -> EvalResult<bool> {
        let tokens = self.tokens;
        self.cursor = self.skip_ignored(self.cursor);

        if self.loops.at_body_end(self.cursor) {
            self.continue_loop()?;
            return Ok(true);
        }

        let index = self.cursor;
        let Some(token) = tokens.get(index) else {
            return Ok(false);
        };
        tracing::trace!(cursor = index, kind = %token.kind, line = token.line, "dispatch");

        match &token.kind {
            TokenKind::Function(name) => self.call_function(index, name)?,
            TokenKind::Keyword(Keyword::Set) => self.assign(index)?,
            TokenKind::Loop(kind) => self.enter_loop(index, *kind)?,
            TokenKind::Literal(_)
            | TokenKind::Variable
            | TokenKind::Operator(_)
            | TokenKind::Assign
            | TokenKind::Delimiter(_)
            | TokenKind::Ignore(_)
            | TokenKind::Error(_)
            | TokenKind::Fragment { .. } => {
                return Err(EvalError::at(
                    EvalErrorKind::UnexpectedToken {
                        found: token.content.clone(),
                    },
                    token,
                ));
            }
        }
        Ok(true)
    }

    /// `NAME ( param , param ... ) ;`
    fn call_function(&mut self, index: usize, name: &str) -> EvalResult<()> {
        let tokens = self.tokens;
        let site = &tokens[index];
        let builtin = self.builtins.get(name).ok_or_else(|| {
            EvalError::at(
                EvalErrorKind::UnknownFunction {
                    name: site.content.clone(),
                },
                site,
            )
        })?;

        let open = self.expect_delimiter(index + 1, Delimiter::LParen)?;
        let close = self.closing_paren(open)?;
        let params = split_params(&tokens[open + 1..close]);
        if params.len() != builtin.arity {
            return Err(EvalError::at(
                EvalErrorKind::WrongParameterCount {
                    name: site.content.clone(),
                    expected: builtin.arity,
                    got: params.len(),
                },
                &tokens[open],
            ));
        }
        let semi = self.expect_delimiter(close + 1, Delimiter::Semicolon)?;

        let mut cx = CallContext {
            variables: &mut self.variables,
            print: &*self.print,
            call_site: site,
        };
        (builtin.call)(&mut cx, &params)?;
        self.cursor = semi + 1;
        Ok(())
    }

    /// `set NAME = expr ;`
    fn assign(&mut self, index: usize) -> EvalResult<()> {
        let tokens = self.tokens;
        let semi = self.statement_end(index)?;

        // `statement_end` guarantees a significant token at `semi`, so both
        // lookups below land on or before it.
        let name_idx = self.skip_ignored(index + 1);
        let name = &tokens[name_idx];
        if name.kind != TokenKind::Variable {
            return Err(EvalError::at(
                EvalErrorKind::ExpectedVariable {
                    found: name.content.clone(),
                },
                name,
            ));
        }
        let assign_idx = self.skip_ignored(name_idx + 1);
        let assign = &tokens[assign_idx];
        if assign.kind != TokenKind::Assign {
            return Err(EvalError::at(
                EvalErrorKind::ExpectedAssign {
                    found: assign.content.clone(),
                },
                assign,
            ));
        }

        let value = evaluate(&tokens[assign_idx + 1..semi], &self.variables)
            .map_err(|err| err.or_at(assign))?;
        tracing::trace!(name = %name.content, %value, "set");
        self.variables.set(name.content.clone(), value);
        self.cursor = semi + 1;
        Ok(())
    }

    /// `repeat ( count ) { body }` and `while ( condition ) { body }`
    fn enter_loop(&mut self, index: usize, kind: LoopKind) -> EvalResult<()> {
        let tokens = self.tokens;
        let open = self.expect_delimiter(index + 1, Delimiter::LParen)?;
        let close = self.closing_paren(open)?;
        let lbrace = self.expect_delimiter(close + 1, Delimiter::LBrace)?;
        let rbrace = self.closing_brace(lbrace)?;
        let condition = open + 1..close;
        let body_start = lbrace + 1;

        let mut frame = match kind {
            LoopKind::Repeat => {
                let count = evaluate(&tokens[condition.clone()], &self.variables)
                    .map_err(|err| err.or_at(&tokens[open]))?;
                let count = count.to_count().map_err(|kind| {
                    EvalError::at(kind, &tokens[self.skip_ignored(condition.start)])
                })?;
                LoopFrame::repeat(count, body_start, rbrace)
            }
            LoopKind::While => LoopFrame::while_loop(condition, body_start, rbrace),
        };

        let state = frame.advance(|range| condition_holds(tokens, range, &self.variables))?;
        if state == LoopState::Running {
            self.loops.push(frame);
            self.cursor = body_start;
        } else {
            tracing::trace!(kind = kind.as_str(), "loop body skipped");
            self.cursor = rbrace + 1;
        }
        Ok(())
    }

    /// The cursor is on the innermost frame's `}`: run its continuation
    /// check and either rewind or leave the loop.
    fn continue_loop(&mut self) -> EvalResult<()> {
        let tokens = self.tokens;
        let variables = &self.variables;
        let Some(frame) = self.loops.top_mut() else {
            return Ok(());
        };
        let state = frame.advance(|range| condition_holds(tokens, range, variables))?;
        let (body_start, body_end) = (frame.body_start, frame.body_end);

        match state {
            LoopState::Running => self.cursor = body_start,
            LoopState::Pending | LoopState::Exhausted => {
                self.loops.pop();
                self.cursor = body_end + 1;
            }
        }
        Ok(())
    }

    fn skip_ignored(&self, mut index: usize) -> usize {
        while self.tokens.get(index).is_some_and(Token::is_ignored) {
            index += 1;
        }
        index
    }

    /// Index of `delimiter` as the next significant token at or after `from`.
    fn expect_delimiter(&self, from: usize, delimiter: Delimiter) -> EvalResult<usize> {
        let index = self.skip_ignored(from);
        let missing = EvalErrorKind::MissingDelimiter {
            expected: delimiter.as_char(),
        };
        match self.tokens.get(index) {
            Some(token) if token.is_delimiter(delimiter) => Ok(index),
            Some(token) => Err(EvalError::at(missing, token)),
            None => Err(self.at_end_of_input(EvalErrorKind::UnexpectedEndOfInput {
                expected: quoted(delimiter),
            })),
        }
    }

    /// Matching `)` for the `(` at `open`.
    ///
    /// A header or argument list cannot span statements, so a `;`, a brace
    /// or a statement keyword before the partner is reported as a missing `)`.
    fn closing_paren(&self, open: usize) -> EvalResult<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match &token.kind {
                TokenKind::Delimiter(Delimiter::LParen) => depth += 1,
                TokenKind::Delimiter(Delimiter::RParen) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(index);
                    }
                }
                TokenKind::Delimiter(Delimiter::Semicolon | Delimiter::LBrace | Delimiter::RBrace)
                | TokenKind::Function(_)
                | TokenKind::Keyword(_)
                | TokenKind::Loop(_) => {
                    return Err(EvalError::at(
                        EvalErrorKind::MissingDelimiter { expected: ')' },
                        token,
                    ));
                }
                _ => {}
            }
        }
        Err(self.at_end_of_input(EvalErrorKind::MissingDelimiter { expected: ')' }))
    }

    /// Matching `}` for the `{` at `open`, honouring nested bodies.
    fn closing_brace(&self, open: usize) -> EvalResult<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            if token.is_delimiter(Delimiter::LBrace) {
                depth += 1;
            } else if token.is_delimiter(Delimiter::RBrace) {
                depth -= 1;
                if depth == 0 {
                    return Ok(index);
                }
            }
        }
        Err(self.at_end_of_input(EvalErrorKind::MissingDelimiter { expected: '}' }))
    }

    /// Index of the `;` ending the statement that starts at `start`.
    ///
    /// Fails if another statement, the enclosing loop's `}` or the end of
    /// the stream comes first. A stream that ends right after the keyword
    /// is an unexpected end of input rather than a missing `;`.
    fn statement_end(&self, start: usize) -> EvalResult<usize> {
        let mut last = start;
        let mut at_eof = true;
        for (index, token) in self.tokens.iter().enumerate().skip(start + 1) {
            if token.is_delimiter(Delimiter::Semicolon) {
                return Ok(index);
            }
            if token.starts_statement() || self.loops.at_body_end(index) {
                at_eof = false;
                break;
            }
            if !token.is_ignored() {
                last = index;
            }
        }
        let kind = if at_eof && last == start {
            EvalErrorKind::UnexpectedEndOfInput {
                expected: "a variable name",
            }
        } else {
            EvalErrorKind::MissingDelimiter { expected: ';' }
        };
        Err(EvalError::after(kind, &self.tokens[last]))
    }

    /// Error placed just past the last significant token of the stream.
    fn at_end_of_input(&self, kind: EvalErrorKind) -> EvalError {
        match self.tokens.iter().rev().find(|t| !t.is_ignored()) {
            Some(last) => EvalError::after(kind, last),
            None => EvalError::unplaced(kind),
        }
    }
}

/// Evaluate a loop condition range; an empty condition is blamed on its `(`.
fn condition_holds(
    tokens: &[Token],
    range: Range<usize>,
    variables: &VariableTable,
) -> EvalResult<bool> {
    let open = range.start.saturating_sub(1);
    let value = evaluate(&tokens[range], variables).map_err(|err| match tokens.get(open) {
        Some(paren) => err.or_at(paren),
        None => err,
    })?;
    Ok(value.is_truthy())
}

fn quoted(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::LParen => "`(`",
        Delimiter::RParen => "`)`",
        Delimiter::LBrace => "`{`",
        Delimiter::RBrace => "`}`",
        Delimiter::Comma => "`,`",
        Delimiter::Semicolon => "`;`",
    }
}

/// Split call parameters on top-level commas.
///
/// A list with no significant tokens has zero parameters.
fn split_params(tokens: &[Token]) -> Vec<&[Token]> {
    if tokens.iter().all(Token::is_ignored) {
        return Vec::new();
    }
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, token) in tokens.iter().enumerate() {
        match &token.kind {
            TokenKind::Delimiter(Delimiter::LParen) => depth += 1,
            TokenKind::Delimiter(Delimiter::RParen) => depth = depth.saturating_sub(1),
            TokenKind::Delimiter(Delimiter::Comma) if depth == 0 => {
                params.push(&tokens[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    params.push(&tokens[start..]);
    params
}
