//! Errors that can occur while parsing an expression.

use ariadne::Fmt;
use mathbot_attrs::ErrorKind;
use mathbot_error::EXPR;
use crate::tokenizer::TokenKind;

/// The input contained no expression at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "empty expression",
    labels = [format!("add an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyExpression;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "check for a missing operator or an extra closing parenthesis",
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = format!("unexpected {}", describe(*found)),
    labels = [format!("expected {}", expected)],
)]
pub struct UnexpectedToken {
    /// A description of what was expected.
    pub expected: &'static str,

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "unclosed parenthesis",
    labels = ["expected `)` here", "this parenthesis is not closed"],
    help = "add a closing parenthesis `)` somewhere after the opening one",
)]
pub struct UnclosedParenthesis;

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// The expression is nested more deeply than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "expression is nested too deeply",
    labels = ["the limit is reached here"],
    help = format!("at most {} levels of nesting are allowed", max),
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub max: usize,
}

/// An equation contained more than one `=`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "an equation can only have one `=`",
    labels = ["this is the second `=`"],
)]
pub struct ChainedEquation;

/// An `=` appeared where only an expression is allowed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = "unexpected `=` in an expression",
    labels = ["here"],
    help = "equations can only be solved, not computed",
)]
pub struct UnexpectedEquation;

/// Returns a human-readable description of a token kind for error messages.
fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Add => "`+`",
        TokenKind::Sub => "`-`",
        TokenKind::Mul => "`*`",
        TokenKind::Div => "`/`",
        TokenKind::Mod => "`%`",
        TokenKind::Exp => "`^`",
        TokenKind::Factorial => "`!`",
        TokenKind::Eq => "`=`",
        TokenKind::Comma => "`,`",
        TokenKind::OpenParen => "`(`",
        TokenKind::CloseParen => "`)`",
        TokenKind::Number => "number",
        TokenKind::Name => "name",
    }
}
