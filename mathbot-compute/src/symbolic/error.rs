//! Errors produced by the algebra routines.
//!
//! Symbolic expressions do not keep track of where they came from in the source, so the routines
//! in this module report a [`SymbolicError`], which is then located in the original syntax tree
//! with [`SymbolicError::into_error`].

use mathbot_attrs::ErrorKind;
use mathbot_error::Error;
use mathbot_parser::parser::ast::expr::Expr as AstExpr;
use std::ops::Range;
use crate::{
    funcs,
    numerical::{
        ctxt::Ctxt,
        error::{DepthExceeded, InvalidNumber, UndefinedFunction, UndefinedVariable, WrongArity},
        ops::NumError,
    },
};

/// The function has no known derivative.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = DomainError,
    message = format!("no known derivative for `{}`", name),
    labels = ["this function"],
    help = "only builtin functions with a single argument (except the rounding functions and `factorial`) can be differentiated",
)]
pub struct NoDerivative {
    /// The name of the function.
    pub name: String,
}

/// The equation is outside the class of equations the solver handles.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Unsupported,
    message = format!("cannot solve this equation: {}", reason),
    labels = ["this equation"],
    help = "only linear and quadratic equations can be solved",
)]
pub struct UnsupportedEquation {
    /// The reason the equation is unsupported.
    pub reason: String,
}

/// The name given as the variable to solve for or differentiate with respect to is not a valid
/// variable name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = SyntaxError,
    message = format!("`{}` is not a valid variable name", name),
    help = "variable names start with a letter or `_`, followed by letters, digits, or `_`",
)]
pub struct InvalidVariable {
    /// The name that was given.
    pub name: String,
}

/// An error produced by the algebra routines, before it is located in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// The expression is nested deeper than the policy allows.
    DepthExceeded,

    /// A number literal could not be read.
    InvalidNumber {
        /// The text of the literal.
        value: String,

        /// Where the literal is in the source.
        span: Range<usize>,
    },

    /// A symbol that is neither bound nor a constant.
    UnknownSymbol(String),

    /// A function that is not a builtin.
    UnknownFunction(String),

    /// A builtin called with the wrong number of arguments.
    WrongArity {
        /// The name of the function.
        name: String,

        /// The number of arguments the function takes.
        expected: usize,

        /// The number of arguments given.
        given: usize,
    },

    /// A function with no known derivative.
    NoDerivative(String),

    /// A numeric operation failed while evaluating part of the expression.
    Numeric(NumError),
}

impl From<NumError> for SymbolicError {
    fn from(err: NumError) -> Self {
        Self::Numeric(err)
    }
}

/// Returns the first span found by `find` in any of the given expressions.
fn find_in(
    sources: &[&AstExpr],
    find: impl Fn(&AstExpr) -> Option<Range<usize>>,
) -> Option<Range<usize>> {
    sources.iter().find_map(|expr| find(*expr))
}

impl SymbolicError {
    /// Converts this error into an [`Error`] located in the given source expressions, which are
    /// the expressions the symbolic expression was converted from.
    pub fn into_error(self, sources: &[&AstExpr], ctxt: &Ctxt) -> Error {
        let whole = match (sources.first(), sources.last()) {
            (Some(first), Some(last)) => first.span().start..last.span().end,
            _ => 0..0,
        };
        let call_name = |name: &str| find_in(sources, |expr| {
            expr.find_call(name).map(|call| call.name.span.clone())
        });

        match self {
            Self::DepthExceeded => Error::new(vec![whole], DepthExceeded {
                max: ctxt.policy.max_depth,
            }),
            Self::InvalidNumber { value, span } => Error::new(vec![span], InvalidNumber { value }),
            Self::UnknownSymbol(name) => {
                let span = find_in(sources, |expr| expr.find_symbol(&name))
                    .or_else(|| call_name(&name))
                    .unwrap_or(whole);
                Error::new(vec![span], UndefinedVariable {
                    suggestions: ctxt.get_similar_vars(&name),
                    name,
                })
            },
            Self::UnknownFunction(name) => {
                let span = call_name(&name).unwrap_or(whole);
                Error::new(vec![span], UndefinedFunction {
                    suggestions: funcs::similar(&name),
                    name,
                })
            },
            Self::WrongArity { name, expected, given } => {
                let spans = sources.iter()
                    .find_map(|expr| expr.find_call(&name))
                    .map(|call| call.outer_span().to_vec())
                    .unwrap_or_else(|| vec![whole]);
                Error::new(spans, WrongArity { name, expected, given })
            },
            Self::NoDerivative(name) => {
                let span = call_name(&name).unwrap_or(whole);
                Error::new(vec![span], NoDerivative { name })
            },
            Self::Numeric(err) => err.into_error(vec![whole]),
        }
    }
}
