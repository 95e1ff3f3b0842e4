use crate::{
    parser::{ast::expr::Expr, error, token::{CloseParen, OpenParen}, Parse, Parser},
    tokenizer::TokenKind,
};
use mathbot_error::Error;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        if input.at(TokenKind::CloseParen) {
            let end = input.span().end;
            return Err(Error::new(vec![open_paren.span.start..end], error::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_paren = close_paren(input, &open_paren)?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}

/// Parses the closing parenthesis that matches `open_paren`. If it is missing, the error points at
/// both the location where it was expected and the opening parenthesis.
pub(crate) fn close_paren(input: &mut Parser, open_paren: &OpenParen) -> Result<CloseParen, Error> {
    match input.peek_kind(0) {
        Some(TokenKind::CloseParen) => input.try_parse::<CloseParen>(),
        None => Err(Error::new(
            vec![input.eof_span(), open_paren.span.clone()],
            error::UnclosedParenthesis,
        )),
        Some(found) => Err(input.error(error::UnexpectedToken {
            expected: "`)`",
            found,
        })),
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
