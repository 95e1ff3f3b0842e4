use crate::numerical::value::Value;
use std::fmt::{self, Display, Formatter};

/// A step taken while solving an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStep {
    /// The equation `lhs = rhs` was rearranged into `lhs - rhs = 0`. Holds the rearranged
    /// expression.
    Rearranged(String),

    /// The rearranged expression was simplified. Holds the simplified expression.
    Simplified(String),

    /// The equation is a polynomial of the given degree.
    Degree(usize),

    /// The discriminant of a quadratic equation.
    Discriminant(Value),

    /// A candidate root was discarded, because substituting it back into the equation did not
    /// give zero, or because it is not real and complex results are rejected.
    Discarded(Value),

    /// Every value of the variable satisfies the simplified equation, but the original equation
    /// is undefined where this divisor is zero. Holds the divisor.
    Undefined(String),
}

impl Display for SolveStep {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Rearranged(expr) => write!(f, "rearrange: {} = 0", expr),
            Self::Simplified(expr) => write!(f, "simplify: {} = 0", expr),
            Self::Degree(degree) => write!(f, "polynomial of degree {}", degree),
            Self::Discriminant(value) => write!(f, "discriminant: {}", value),
            Self::Discarded(value) => write!(f, "discard candidate root {}", value),
            Self::Undefined(divisor) => write!(f, "except where {} = 0", divisor),
        }
    }
}
