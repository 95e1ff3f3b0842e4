use crate::parser::{ast::expr::Expr, token::op::{BinOp, BinOpKind}};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Builds the node `lhs op rhs`.
    pub fn new(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        let span = lhs.span().start..rhs.span().end;
        Self { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span }
    }

    /// Builds the node for the implicit multiplication of two adjacent operands, such as `2x`.
    pub fn implicit_mul(lhs: Expr, rhs: Expr) -> Self {
        let op = BinOp {
            kind: BinOpKind::Mul,
            implicit: true,
            span: lhs.span().end..rhs.span().start,
        };
        Self::new(lhs, op, rhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.op.implicit {
            write!(f, "{}{}", self.lhs, self.rhs)
        } else {
            write!(f, "{} {} {}", self.lhs, self.op.kind, self.rhs)
        }
    }
}
