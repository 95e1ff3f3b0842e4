pub mod ast;
pub mod error;
pub mod iter;
pub mod token;

use ast::{equation::Equation, expr::Expr};
use mathbot_error::{Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// The maximum nesting depth the parser accepts before giving up with [`error::NestingTooDeep`].
/// Unary operators, exponents, parentheses and function calls each add a level, as does every
/// binary operator in a chain such as `1 + 2 + 3`.
pub const MAX_NESTING: usize = 256;

/// A high-level parser for calculator expressions. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
#[derive(Debug)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The length of the source, used to point errors at the end of the input.
    source_len: usize,

    /// How deeply nested the expression currently being parsed is.
    depth: usize,

    /// The error produced by the tokenizer, if any. It is reported by the first call to
    /// [`Parser::try_parse_full`].
    lex_error: Option<Error>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        let (tokens, lex_error) = match tokenize_complete(source) {
            Ok(tokens) => (tokens, None),
            Err(err) => (Box::default(), Some(err)),
        };
        Self {
            tokens,
            cursor: 0,
            source_len: source.len(),
            depth: 0,
            lex_error,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.source_len..self.source_len
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the token `n` places after the current one, without moving the cursor.
    pub fn peek_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.cursor + n).map(|token| token.kind)
    }

    /// Returns true if the current token is of the given kind.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind(0) == Some(kind)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> and a reference are cloned
                Ok(token.clone())
            },
            None => Err(self.error(error::UnexpectedEof)),
        }
    }

    /// Records that the parser is descending one level deeper into the expression. Fails if the
    /// nesting limit is exceeded. Each successful call must be paired with [`Parser::ascend`].
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(error::NestingTooDeep { max: MAX_NESTING }));
        }
        self.depth += 1;
        Ok(())
    }

    /// Records that the parser has finished parsing a nested level of the expression.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let (start, depth) = (self.cursor, self.depth);
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                self.depth = depth;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    ///
    /// Lexical errors are reported here, as is an input without any tokens.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        if let Some(err) = self.lex_error.take() {
            return Err(err);
        }
        if self.tokens.is_empty() {
            return Err(Error::new(vec![0..0], error::EmptyExpression));
        }

        let value = T::parse(self)?;
        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::Eq => Err(self.error(error::UnexpectedEquation)),
            Some(_) => Err(self.error(error::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`. For unary
    /// operations, this means `a op op` is evaluated as `(a op) op` (the operators appear to the
    /// right of the operand).
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), modulo (`%`), and implicit
    /// multiplication, which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Precedence of factorial (`!`).
    Factorial,
}

impl Precedence {
    /// Returns the next higher precedence level. The highest level returns itself.
    pub fn tighter(self) -> Self {
        match self {
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg => Self::Exp,
            Self::Exp | Self::Factorial => Self::Factorial,
        }
    }
}

/// Parses a single expression from the given source.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::new(source).try_parse_full::<Expr>()
}

/// Parses an expression or an equation of the form `lhs = rhs` from the given source.
pub fn parse_equation(source: &str) -> Result<Equation, Error> {
    Parser::new(source).try_parse_full::<Equation>()
}
