use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::Literal,
            paren::Paren,
            unary::Unary,
        },
        error,
        iter::ExprIter,
        token::op::{BinOp, BinOpKind, UnaryOp},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use mathbot_error::Error;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression.
///
/// An expression is any valid piece of text that can be evaluated to produce a value, or be
/// transformed by the algebra routines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `abs(-1)`.
    Call(Call),

    /// A unary operation, such as `-1` or `5!`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// If this expression is a [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns the span of the first occurrence of the variable with the given name, in
    /// left-to-right order.
    pub fn find_symbol(&self, name: &str) -> Option<Range<usize>> {
        self.post_order_iter().find_map(|expr| match expr {
            Expr::Literal(Literal::Symbol(sym)) if sym.name == name => Some(sym.span.clone()),
            _ => None,
        })
    }

    /// Returns the first call to the function with the given name, in left-to-right order.
    pub fn find_call(&self, name: &str) -> Option<&Call> {
        self.post_order_iter().find_map(|expr| match expr {
            Expr::Call(call) if call.name.name == name => Some(call),
            _ => None,
        })
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        parse_binary(input, Precedence::Term)
    }
}

/// Parses a chain of operands separated by binary operators whose precedence is at least
/// `precedence`. Exponentiation is handled separately by [`parse_power`].
///
/// An operand directly followed by something that can start another operand is implicit
/// multiplication, which has the precedence of a factor. The operand on the right of an implicit
/// multiplication is a power, so `2-3x` is `2-(3x)` and `2x^2` is `2(x^2)`.
fn parse_binary(input: &mut Parser, precedence: Precedence) -> Result<Expr, Error> {
    let mut lhs = parse_unary(input)?;

    // each operator nests the previous operands one level deeper in the tree
    let mut levels = 0;
    let expr = loop {
        let Some(kind) = input.peek_kind(0) else {
            break lhs;
        };

        match BinOpKind::from_token(kind) {
            Some(op_kind) if op_kind != BinOpKind::Exp => {
                if op_kind.precedence() < precedence {
                    break lhs;
                }

                input.descend()?;
                levels += 1;

                let op = input.try_parse::<BinOp>()?;
                let rhs_precedence = match op.associativity() {
                    Associativity::Left => op.precedence().tighter(),
                    Associativity::Right => op.precedence(),
                };
                let rhs = parse_binary(input, rhs_precedence)?;
                lhs = Expr::Binary(Binary::new(lhs, op, rhs));
            },
            Some(_) => break lhs,
            None if precedence <= Precedence::Factor && kind.starts_primary() => {
                input.descend()?;
                levels += 1;

                let rhs = parse_power(input)?;
                lhs = Expr::Binary(Binary::implicit_mul(lhs, rhs));
            },
            None => break lhs,
        }
    };

    for _ in 0..levels {
        input.ascend();
    }
    Ok(expr)
}

/// Parses a unary negation, or a power if there is no negation.
fn parse_unary(input: &mut Parser) -> Result<Expr, Error> {
    input.descend()?;
    let expr = if input.at(TokenKind::Sub) {
        let op = input.try_parse::<UnaryOp>()?;
        parse_unary(input).map(|operand| Expr::Unary(Unary::prefix(op, operand)))
    } else {
        parse_power(input)
    };
    input.ascend();
    expr
}

/// Parses a base, optionally raised to a (right-associative) exponent. The exponent itself may be
/// negated, as in `2^-1`.
fn parse_power(input: &mut Parser) -> Result<Expr, Error> {
    let base = parse_postfix(input)?;
    if input.at(TokenKind::Exp) {
        let op = input.try_parse::<BinOp>()?;
        let exponent = parse_unary(input)?;
        return Ok(Expr::Binary(Binary::new(base, op, exponent)));
    }
    Ok(base)
}

/// Parses a primary expression followed by any number of factorials.
fn parse_postfix(input: &mut Parser) -> Result<Expr, Error> {
    let mut operand = parse_primary(input)?;
    while input.at(TokenKind::Factorial) {
        let op = input.try_parse::<UnaryOp>()?;
        operand = Expr::Unary(Unary::postfix(operand, op));
    }
    Ok(operand)
}

/// Parses a literal, a function call, or a parenthesized expression.
fn parse_primary(input: &mut Parser) -> Result<Expr, Error> {
    match input.peek_kind(0) {
        Some(TokenKind::Number) => input.try_parse::<Literal>().map(Expr::Literal),
        Some(TokenKind::Name) if input.peek_kind(1) == Some(TokenKind::OpenParen) => {
            input.try_parse::<Call>().map(Expr::Call)
        },
        Some(TokenKind::Name) => input.try_parse::<Literal>().map(Expr::Literal),
        Some(TokenKind::OpenParen) => input.try_parse::<Paren>().map(Expr::Paren),
        Some(found) => Err(input.error(error::UnexpectedToken {
            expected: "an expression",
            found,
        })),
        None => Err(input.error(error::UnexpectedEof)),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
