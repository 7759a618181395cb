//! Expression evaluator.
//!
//! Reduces a token slice to a single [`Value`] in two passes:
//!
//! 1. Shunting-yard conversion to postfix. Literals are coerced and variables
//!    resolved as they are read, so every operand carries the span of the
//!    token it came from. Operators of equal or higher precedence pop before
//!    a new operator is pushed, so all operators are left-associative.
//! 2. Postfix reduction on an operand stack (right operand popped first).
//!
//! Both operands of `AND`/`OR` are always evaluated.

use prism_ir::{BinaryOp, Delimiter, Span, Token, TokenKind};

use crate::operators::apply_binary;
use crate::{EvalError, EvalErrorKind, EvalResult, Value, VariableTable};

/// A value plus the source location it was read from.
#[derive(Clone, Debug)]
struct Operand {
    value: Value,
    span: Span,
    line: u32,
}

#[derive(Clone, Debug)]
enum Postfix {
    Operand(Operand),
    Operator { op: BinaryOp, span: Span, line: u32 },
}

/// Entries of the shunting-yard operator stack.
enum Pending<'t> {
    Operator(BinaryOp, &'t Token),
    Paren(&'t Token),
}

/// Evaluate `tokens` against `variables`.
///
/// IGNORE tokens in the slice are skipped. An empty expression fails with an
/// unplaced `MissingExpression`; callers locate it with [`EvalError::or_at`].
pub fn evaluate(tokens: &[Token], variables: &VariableTable) -> EvalResult<Value> {
    let postfix = to_postfix(tokens, variables)?;
    reduce(postfix)
}

fn resolve(token: &Token, variables: &VariableTable) -> EvalResult<Operand> {
    let value = match &token.kind {
        TokenKind::Literal(kind) => {
            Value::from_literal(*kind, &token.content).map_err(|kind| EvalError::at(kind, token))?
        }
        TokenKind::Variable => variables.get(&token.content).cloned().ok_or_else(|| {
            EvalError::at(
                EvalErrorKind::UndefinedVariable {
                    name: token.content.clone(),
                },
                token,
            )
        })?,
        _ => {
            return Err(EvalError::at(
                EvalErrorKind::UnexpectedToken {
                    found: token.content.clone(),
                },
                token,
            ))
        }
    };
    Ok(Operand {
        value,
        span: token.span,
        line: token.line,
    })
}

/// Move a popped operator to the output; parentheses are dropped.
fn flush(entry: Pending<'_>, output: &mut Vec<Postfix>) {
    if let Pending::Operator(op, token) = entry {
        output.push(Postfix::Operator {
            op,
            span: token.span,
            line: token.line,
        });
    }
}

fn to_postfix(tokens: &[Token], variables: &VariableTable) -> EvalResult<Vec<Postfix>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut pending: Vec<Pending<'_>> = Vec::new();

    for token in tokens.iter().filter(|t| !t.is_ignored()) {
        match &token.kind {
            TokenKind::Operator(op) => {
                while let Some(Pending::Operator(top, _)) = pending.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    if let Some(entry) = pending.pop() {
                        flush(entry, &mut output);
                    }
                }
                pending.push(Pending::Operator(*op, token));
            }
            TokenKind::Delimiter(Delimiter::LParen) => pending.push(Pending::Paren(token)),
            TokenKind::Delimiter(Delimiter::RParen) => loop {
                match pending.pop() {
                    Some(Pending::Paren(_)) => break,
                    Some(entry) => flush(entry, &mut output),
                    None => {
                        return Err(EvalError::at(
                            EvalErrorKind::MismatchedParen { unmatched: ')' },
                            token,
                        ))
                    }
                }
            },
            _ => output.push(Postfix::Operand(resolve(token, variables)?)),
        }
    }

    while let Some(entry) = pending.pop() {
        if let Pending::Paren(paren) = entry {
            return Err(EvalError::at(
                EvalErrorKind::MismatchedParen { unmatched: '(' },
                paren,
            ));
        }
        flush(entry, &mut output);
    }

    Ok(output)
}

fn reduce(postfix: Vec<Postfix>) -> EvalResult<Value> {
    let mut stack: Vec<Operand> = Vec::new();

    for item in postfix {
        match item {
            Postfix::Operand(operand) => stack.push(operand),
            Postfix::Operator { op, span, line } => {
                let malformed = || EvalError::new(EvalErrorKind::MalformedExpression, span, line);
                let right = stack.pop().ok_or_else(malformed)?;
                let left = stack.pop().ok_or_else(malformed)?;

                for operand in [&left, &right] {
                    if let Value::Str(_) = operand.value {
                        return Err(EvalError::new(
                            EvalErrorKind::TypeMismatch {
                                expected: "number",
                                found: "string",
                            },
                            operand.span,
                            operand.line,
                        ));
                    }
                }

                let value = apply_binary(op, &left.value, &right.value)
                    .map_err(|kind| EvalError::new(kind, span, line))?;
                tracing::trace!(%op, %value, "apply");
                stack.push(Operand {
                    value,
                    span: left.span.merge(right.span),
                    line: left.line,
                });
            }
        }
    }

    match stack.len() {
        0 => Err(EvalError::unplaced(EvalErrorKind::MissingExpression)),
        1 => Ok(stack.swap_remove(0).value),
        _ => {
            let extra = &stack[1];
            Err(EvalError::new(
                EvalErrorKind::MalformedExpression,
                extra.span,
                extra.line,
            ))
        }
    }
}
