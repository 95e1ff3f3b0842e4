use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym, paren::close_paren},
        error,
        token::{Comma, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use mathbot_error::Error;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `sqrt(2)` or `max(x, 1)`.
///
/// The number of arguments is not checked by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let mut args = Vec::new();

        if !input.at(TokenKind::CloseParen) {
            loop {
                args.push(input.try_parse::<Expr>()?);
                match input.peek_kind(0) {
                    Some(TokenKind::Comma) => {
                        input.try_parse::<Comma>()?;
                    },
                    Some(TokenKind::CloseParen) | None => break,
                    Some(found) => return Err(input.error(error::UnexpectedToken {
                        expected: "`,` or `)`",
                        found,
                    })),
                }
            }
        }

        let close_paren = close_paren(input, &open_paren)?;
        let span = name.span.start..close_paren.span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
