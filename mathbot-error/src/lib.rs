//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type returned by every fallible operation of the calculator.

use ariadne::{Color, Report};
use std::{fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad category an error belongs to.
///
/// Callers that want to react to a failure (rather than just display it) should match on this
/// instead of on the concrete error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// An unrecognized character in the input.
    LexError,

    /// The input is not a well-formed expression.
    SyntaxError,

    /// A variable or function name that is not defined.
    UnknownIdentifier,

    /// A function was called with the wrong number of arguments.
    ArityMismatch,

    /// An operation was applied outside of its domain, such as `(-1)!`.
    DomainError,

    /// Division or modulo by exact zero.
    DivisionByZero,

    /// A result or intermediate value exceeded the configured magnitude, depth, or work budget.
    Overflow,

    /// An equation outside of the class the solver handles.
    Unsupported,
}

impl Display for ErrorClass {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Self::LexError => "lex error",
            Self::SyntaxError => "syntax error",
            Self::UnknownIdentifier => "unknown identifier",
            Self::ArityMismatch => "arity mismatch",
            Self::DomainError => "domain error",
            Self::DivisionByZero => "division by zero",
            Self::Overflow => "overflow",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{}", name)
    }
}

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `mathbot_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the class of this error.
    fn class(&self) -> ErrorClass;

    /// Returns the human-readable message of this error, without any color.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from. The first span is the
    /// primary location of the error.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the class of this error.
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Returns the human-readable message of this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Returns the primary span of this error.
    pub fn span(&self) -> Range<usize> {
        self.spans.first().cloned().unwrap_or(0..0)
    }

    /// Returns the byte offset into the source that this error points at.
    pub fn offset(&self) -> usize {
        self.span().start
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Formats this error as a single line of plain text that quotes the offending part of the
    /// given source, for callers that cannot display an [`ariadne`] report.
    pub fn quote(&self, source: &str) -> String {
        let span = self.span();
        let location = match source.get(span.clone()) {
            Some(text) if !text.is_empty() => format!("at `{}`", text),
            _ if span.start >= source.len() => "at end of input".to_string(),
            _ => format!("at offset {}", span.start),
        };
        format!("{}: {} {} (offset {})", self.class(), self.message(), location, span.start)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.class(), self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Dummy;

    impl ErrorKind for Dummy {
        fn class(&self) -> ErrorClass {
            ErrorClass::DivisionByZero
        }

        fn message(&self) -> String {
            "attempted to divide by zero".to_string()
        }

        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<(&'a str, Range<usize>)> {
            Report::build(ariadne::ReportKind::Error, src_id, spans[0].start)
                .with_message(self.message())
                .finish()
        }
    }

    #[test]
    fn quote_substring() {
        let err = Error::new(vec![2..3], Dummy);
        assert_eq!(err.offset(), 2);
        assert_eq!(err.quote("1/0"), "division by zero: attempted to divide by zero at `0` (offset 2)");
    }

    #[test]
    fn quote_end_of_input() {
        let err = Error::new(vec![2..2], Dummy);
        assert_eq!(err.quote("2+"), "division by zero: attempted to divide by zero at end of input (offset 2)");
    }

    #[test]
    fn quote_without_spans() {
        let err = Error::new(vec![], Dummy);
        assert_eq!(err.span(), 0..0);
        assert_eq!(err.to_string(), "division by zero: attempted to divide by zero");
    }
}
