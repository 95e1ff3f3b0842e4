use crate::{
    parser::{ast::expr::Expr, error, token::Eq, Parse, Parser},
    tokenizer::TokenKind,
};
use mathbot_error::Error;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation of the form `lhs = rhs`, or a lone expression that is implicitly equal to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation, if there was an `=`.
    pub rhs: Option<Expr>,
}

impl Equation {
    /// Returns the span of the equation.
    pub fn span(&self) -> Range<usize> {
        let start = self.lhs.span().start;
        let end = self.rhs.as_ref().map_or(self.lhs.span().end, |rhs| rhs.span().end);
        start..end
    }
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse::<Expr>()?;
        if !input.at(TokenKind::Eq) {
            return Ok(Self { lhs, rhs: None });
        }

        input.try_parse::<Eq>()?;
        let rhs = input.try_parse::<Expr>()?;
        if input.at(TokenKind::Eq) {
            return Err(input.error(error::ChainedEquation));
        }

        Ok(Self { lhs, rhs: Some(rhs) })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lhs)?;
        if let Some(rhs) = &self.rhs {
            write!(f, " = {}", rhs)?;
        }
        Ok(())
    }
}
