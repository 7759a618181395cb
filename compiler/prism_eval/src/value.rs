//! Runtime values.
//!
//! Values are produced from immutable tokens by [`Value::from_literal`];
//! the token stream itself never changes.

use std::fmt;

use prism_ir::LiteralKind;

use crate::EvalErrorKind;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Coerce literal token text into a value.
    ///
    /// Numbers become `Int` when the text is an exact `i64`, otherwise
    /// `Float`. Strings lose one pair of matching outer quotes.
    pub fn from_literal(kind: LiteralKind, text: &str) -> Result<Value, EvalErrorKind> {
        let invalid = |kind: &'static str| EvalErrorKind::InvalidLiteral {
            kind,
            text: text.to_owned(),
        };
        match kind {
            LiteralKind::Number => {
                if let Ok(int) = text.parse::<i64>() {
                    Ok(Value::Int(int))
                } else {
                    text.parse::<f64>()
                        .map(Value::Float)
                        .map_err(|_| invalid("number"))
                }
            }
            LiteralKind::String => Ok(Value::Str(strip_quotes(text).to_owned())),
            LiteralKind::Boolean => match text {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid("boolean")),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
        }
    }

    /// Non-zero numbers, `true` and non-empty strings are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(text) => !text.is_empty(),
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
        }
    }

    /// Interpret the value as a `repeat` count.
    ///
    /// Floats truncate toward zero (saturating), booleans count as 0 or 1.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float-to-int `as` saturates, which is the intended clamp"
    )]
    pub fn to_count(&self) -> Result<i64, EvalErrorKind> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Float(f) => Ok(f.trunc() as i64),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Str(_) => Err(EvalErrorKind::TypeMismatch {
                expected: "number",
                found: "string",
            }),
        }
    }
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => f.write_str(text),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}
