//! Binary operators and their fixed precedence table.

use std::fmt;

/// Infix operators understood by the expression evaluator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
}

impl BinaryOp {
    pub const ALL: &[BinaryOp] = &[
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Pow,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::LtEq,
        BinaryOp::GtEq,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::And,
        BinaryOp::Or,
    ];

    /// Subclass tag used for this operator in rule files.
    pub fn subclass(self) -> &'static str {
        match self {
            BinaryOp::Add => "PLUS",
            BinaryOp::Sub => "MINUS",
            BinaryOp::Mul => "TIMES",
            BinaryOp::Div => "DIVIDE",
            BinaryOp::Mod => "MODULO",
            BinaryOp::Pow => "POWER",
            BinaryOp::Lt => "LESS_THAN",
            BinaryOp::Gt => "GREATER_THAN",
            BinaryOp::LtEq => "LESS_EQUAL",
            BinaryOp::GtEq => "GREATER_EQUAL",
            BinaryOp::Eq => "EQUAL_TO",
            BinaryOp::NotEq => "NOT_EQUAL",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
        }
    }

    pub fn from_subclass(subclass: &str) -> Option<BinaryOp> {
        Self::ALL.iter().copied().find(|op| op.subclass() == subclass)
    }

    /// Binding strength; higher binds tighter.
    ///
    /// Operators of equal precedence associate to the left.
    pub fn precedence(self) -> i8 {
        match self {
            BinaryOp::Pow => 3,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 2,
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq
            | BinaryOp::Eq
            | BinaryOp::NotEq => 0,
            BinaryOp::And => -1,
            BinaryOp::Or => -2,
        }
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subclass_round_trips_for_every_operator() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::from_subclass(op.subclass()), Some(*op));
        }
        assert_eq!(BinaryOp::from_subclass("ASSIGN"), None);
    }

    #[test]
    fn precedence_table_ordering() {
        assert!(BinaryOp::Pow.precedence() > BinaryOp::Mul.precedence());
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }
}
