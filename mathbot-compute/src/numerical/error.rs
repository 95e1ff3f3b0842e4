//! Errors that can occur while evaluating an expression.

use ariadne::Fmt;
use mathbot_attrs::ErrorKind;
use mathbot_error::EXPR;

/// Builds the help text listing names similar to a misspelled one.
fn suggest(what: &str, suggestions: &[String]) -> String {
    match suggestions {
        [] => format!("check the spelling, or bind the {} to a value first", what),
        [only] => format!("did you mean `{}`?", only.fg(EXPR)),
        many => format!(
            "did you mean one of these? {}",
            many.iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// The variable is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = UnknownIdentifier,
    message = format!("`{}` is not defined", name),
    labels = ["this variable"],
    help = suggest("variable", suggestions),
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,

    /// A list of similarly named variables and constants, if any.
    pub suggestions: Vec<String>,
}

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = UnknownIdentifier,
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "type `help` in the shell for a list of available functions".to_string()
    } else {
        suggest("function", suggestions)
    },
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = ArityMismatch,
    message = if given > expected {
        format!("too many arguments were given to the `{}` function", name)
    } else {
        format!("missing arguments for the `{}` function", name)
    },
    labels = ["this function call", ""],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given,
    ),
)]
pub struct WrongArity {
    /// The name of the function that was called.
    pub name: String,

    /// The number of arguments that were expected.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A number literal could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = LexError,
    message = format!("`{}` is not a valid number", value),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The text of the literal.
    pub value: String,
}

/// Division or modulo by exact zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = DivisionByZero,
    message = "division by zero",
    labels = ["this expression evaluates to zero"],
)]
pub struct DivisionByZero;

/// An operation was applied to a value outside of its domain.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = DomainError,
    message = reason,
    labels = ["this expression"],
)]
pub struct DomainError {
    /// A description of the problem.
    pub reason: String,
}

/// An operation on real numbers would produce a complex result, but complex results are
/// disabled.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = DomainError,
    message = format!("{} gives a complex result", operation),
    labels = ["this expression"],
    help = "complex results are disabled for this calculation",
)]
pub struct ComplexNotAllowed {
    /// The operation that produced the complex result.
    pub operation: &'static str,
}

/// A value exceeded the magnitude limit.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Overflow,
    message = reason,
    labels = ["this expression"],
)]
pub struct Overflow {
    /// A description of the problem.
    pub reason: String,
}

/// The expression is nested too deeply to evaluate.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Overflow,
    message = "maximum evaluation depth exceeded",
    labels = ["this expression is nested too deeply"],
    help = format!("the maximum depth is: `{}`", max),
)]
pub struct DepthExceeded {
    /// The maximum depth.
    pub max: usize,
}
