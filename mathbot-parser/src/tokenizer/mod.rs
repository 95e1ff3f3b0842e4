pub mod token;

use logos::{Lexer, Logos};
use mathbot_attrs::ErrorKind;
use mathbot_error::Error;
pub use token::{Token, TokenKind};

/// An unrecognized character was found in the input.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = LexError,
    message = format!("unrecognized character `{}`", lexeme),
    labels = ["this character"],
    help = "only numbers, names, `+ - * / ^ % !`, `=`, commas, and parentheses are allowed",
)]
pub struct InvalidToken {
    /// The text that could not be tokenized.
    pub lexeme: String,
}

/// A lazy iterator over the tokens of some source text.
///
/// This iterator is created by [`tokenize`]. Each item is either a token or an [`InvalidToken`]
/// error pointing at the unrecognized text. Consumers may stop at any point.
pub struct Tokens<'source> {
    lexer: Lexer<'source, TokenKind>,
}

impl<'source> Iterator for Tokens<'source> {
    type Item = Result<Token<'source>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.lexer.next()?;
        let span = self.lexer.span();
        let lexeme = self.lexer.slice();
        Some(match kind {
            Ok(kind) => Ok(Token { span, kind, lexeme }),
            Err(()) => Err(Error::new(vec![span], InvalidToken { lexeme: lexeme.to_owned() })),
        })
    }
}

/// Returns a lazy iterator over the tokens produced by the tokenizer. Whitespace is skipped.
pub fn tokenize(input: &str) -> Tokens {
    Tokens { lexer: TokenKind::lexer(input) }
}

/// Returns an owned array containing all of the tokens produced by the tokenizer, or the first
/// lexical error. Owning the tokens allows the parser to backtrack.
pub fn tokenize_complete(input: &str) -> Result<Box<[Token]>, Error> {
    tokenize(input).collect()
}

#[cfg(test)]
mod tests {
    use mathbot_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut tokens = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            let token = tokens.next().unwrap().unwrap();
            assert_eq!((token.kind, token.lexeme), (expected_kind, expected_lexeme));
        }

        assert!(tokens.next().is_none());
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1"),
                (TokenKind::Add, "+"),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn numbers_with_exponents() {
        compare_tokens(
            "1.5e-3 2E10 0.25",
            [
                (TokenKind::Number, "1.5e-3"),
                (TokenKind::Number, "2E10"),
                (TokenKind::Number, "0.25"),
            ],
        );
    }

    #[test]
    fn numbers_without_fraction_digits() {
        compare_tokens(
            "1. + 2.e3*x",
            [
                (TokenKind::Number, "1."),
                (TokenKind::Add, "+"),
                (TokenKind::Number, "2.e3"),
                (TokenKind::Mul, "*"),
                (TokenKind::Name, "x"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication_is_not_inserted() {
        compare_tokens(
            "2x(x_1+1)(y)",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x_1"),
                (TokenKind::Add, "+"),
                (TokenKind::Number, "1"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "y"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn every_operator() {
        compare_tokens(
            "+-*/^%!=,",
            [
                (TokenKind::Add, "+"),
                (TokenKind::Sub, "-"),
                (TokenKind::Mul, "*"),
                (TokenKind::Div, "/"),
                (TokenKind::Exp, "^"),
                (TokenKind::Mod, "%"),
                (TokenKind::Factorial, "!"),
                (TokenKind::Eq, "="),
                (TokenKind::Comma, ","),
            ],
        );
    }

    #[test]
    fn spans_skip_whitespace() {
        let tokens = tokenize_complete("  sin (x)").unwrap();
        assert_eq!(tokens[0].span, 2..5);
        assert_eq!(tokens[1].span, 6..7);
    }

    #[test]
    fn invalid_character() {
        let err = tokenize_complete("2 + $").unwrap_err();
        assert_eq!(err.class(), ErrorClass::LexError);
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn lazy_until_error() {
        // the tokens before the invalid character are produced normally
        let mut tokens = tokenize("1 # 2");
        assert_eq!(tokens.next().unwrap().unwrap().kind, TokenKind::Number);
        assert!(tokens.next().unwrap().is_err());
    }
}
