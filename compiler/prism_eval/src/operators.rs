//! Binary operator semantics.
//!
//! - `Bool` operands promote to `Int` for arithmetic and comparison
//! - `Int` op `Int` stays `Int` with checked overflow, except `/`
//! - any `Float` operand makes the operation `Float`
//! - `%` is floored (result takes the sign of the divisor)
//! - `AND`/`OR` combine truthiness and always yield `Bool`
//!
//! Strings are rejected before reaching this module.

use std::cmp::Ordering;

use prism_ir::BinaryOp;

use crate::{EvalErrorKind, Value};

#[derive(Copy, Clone, Debug)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    #[allow(
        clippy::cast_precision_loss,
        reason = "mixed int/float arithmetic is defined as float arithmetic"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(n) => n == 0,
            Num::Float(f) => f == 0.0,
        }
    }
}

fn numeric(value: &Value) -> Result<Num, EvalErrorKind> {
    match value {
        Value::Int(n) => Ok(Num::Int(*n)),
        Value::Float(f) => Ok(Num::Float(*f)),
        Value::Bool(b) => Ok(Num::Int(i64::from(*b))),
        Value::Str(_) => Err(EvalErrorKind::TypeMismatch {
            expected: "number",
            found: "string",
        }),
    }
}

/// Apply `op` to two evaluated operands.
pub fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalErrorKind> {
    let l = numeric(left)?;
    let r = numeric(right)?;

    match op {
        BinaryOp::Add => checked(op, l, r, i64::checked_add, |a, b| a + b),
        BinaryOp::Sub => checked(op, l, r, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => checked(op, l, r, i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => {
            if r.is_zero() {
                return Err(EvalErrorKind::DivisionByZero);
            }
            Ok(Value::Float(l.as_f64() / r.as_f64()))
        }
        BinaryOp::Mod => floored_mod(l, r),
        BinaryOp::Pow => power(l, r),
        BinaryOp::Lt => Ok(Value::Bool(compare(l, r) == Some(Ordering::Less))),
        BinaryOp::Gt => Ok(Value::Bool(compare(l, r) == Some(Ordering::Greater))),
        BinaryOp::LtEq => Ok(Value::Bool(matches!(
            compare(l, r),
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::GtEq => Ok(Value::Bool(matches!(
            compare(l, r),
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        BinaryOp::Eq => Ok(Value::Bool(compare(l, r) == Some(Ordering::Equal))),
        BinaryOp::NotEq => Ok(Value::Bool(compare(l, r) != Some(Ordering::Equal))),
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

fn checked(
    op: BinaryOp,
    l: Num,
    r: Num,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalErrorKind> {
    match (l, r) {
        (Num::Int(a), Num::Int(b)) => int_op(a, b)
            .map(Value::Int)
            .ok_or(EvalErrorKind::IntegerOverflow {
                op: op.as_symbol(),
            }),
        _ => Ok(Value::Float(float_op(l.as_f64(), r.as_f64()))),
    }
}

fn floored_mod(l: Num, r: Num) -> Result<Value, EvalErrorKind> {
    if r.is_zero() {
        return Err(EvalErrorKind::DivisionByZero);
    }
    match (l, r) {
        (Num::Int(a), Num::Int(b)) => {
            let rem = a
                .checked_rem(b)
                .ok_or(EvalErrorKind::IntegerOverflow { op: "%" })?;
            if rem != 0 && (rem < 0) != (b < 0) {
                Ok(Value::Int(rem + b))
            } else {
                Ok(Value::Int(rem))
            }
        }
        _ => {
            let (a, b) = (l.as_f64(), r.as_f64());
            let rem = a % b;
            if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
                Ok(Value::Float(rem + b))
            } else {
                Ok(Value::Float(rem))
            }
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "exponent bounds are checked before narrowing"
)]
fn power(l: Num, r: Num) -> Result<Value, EvalErrorKind> {
    // A negative power of zero is a division by zero.
    if l.is_zero() && r.as_f64() < 0.0 {
        return Err(EvalErrorKind::DivisionByZero);
    }
    match (l, r) {
        (Num::Int(base), Num::Int(exp)) if exp >= 0 => u32::try_from(exp)
            .ok()
            .and_then(|exp| base.checked_pow(exp))
            .map(Value::Int)
            .ok_or(EvalErrorKind::IntegerOverflow { op: "^" }),
        (Num::Int(_), Num::Int(exp)) if exp >= i64::from(i32::MIN) => {
            Ok(Value::Float(l.as_f64().powi(exp as i32)))
        }
        _ => Ok(Value::Float(l.as_f64().powf(r.as_f64()))),
    }
}

fn compare(l: Num, r: Num) -> Option<Ordering> {
    match (l, r) {
        (Num::Int(a), Num::Int(b)) => Some(a.cmp(&b)),
        _ => l.as_f64().partial_cmp(&r.as_f64()),
    }
}
