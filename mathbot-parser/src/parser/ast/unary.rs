use crate::parser::{ast::expr::Expr, token::op::{UnaryOp, UnaryOpKind}};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x` or `5!`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Builds a prefix expression, like `-x`.
    pub fn prefix(op: UnaryOp, operand: Expr) -> Self {
        let span = op.span.start..operand.span().end;
        Self { operand: Box::new(operand), op, span }
    }

    /// Builds a postfix expression, like `x!`.
    pub fn postfix(operand: Expr, op: UnaryOp) -> Self {
        let span = operand.span().start..op.span.end;
        Self { operand: Box::new(operand), op, span }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            UnaryOpKind::Neg => write!(f, "-{}", self.operand),
            UnaryOpKind::Factorial => write!(f, "{}!", self.operand),
        }
    }
}
