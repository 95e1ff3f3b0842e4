//! Limits and options that control how expressions are evaluated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How to handle operations whose result is a complex number even though every input is real,
/// such as `sqrt(-4)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComplexPolicy {
    /// Return the complex result.
    #[default]
    Promote,

    /// Report the operation as a domain error.
    Reject,
}

/// Options and resource limits for evaluation and algebra.
///
/// Every limit is checked as the computation proceeds, so any input terminates in bounded time
/// and memory, either with a result or with an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Policy {
    /// How to handle real operations with complex results.
    pub complex: ComplexPolicy,

    /// The maximum depth of recursion through an expression tree.
    pub max_depth: usize,

    /// The largest `n` for which `n!` is computed.
    pub max_factorial: u32,

    /// The largest binary exponent a value may have. A value of roughly `2^max_exponent` or
    /// larger is an overflow.
    pub max_exponent: i32,

    /// The maximum number of rewrites a single simplification may apply.
    pub max_rewrites: usize,

    /// The tolerance used for approximate comparisons, such as checking whether a number is an
    /// integer, or whether two roots of an equation are the same.
    pub tolerance: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            complex: ComplexPolicy::Promote,
            max_depth: 1024,
            max_factorial: 1000,
            max_exponent: 16384,
            max_rewrites: 10_000,
            tolerance: 1e-9,
        }
    }
}

impl Policy {
    /// Returns a policy that rejects complex results, with the default limits.
    pub fn real() -> Self {
        Self {
            complex: ComplexPolicy::Reject,
            ..Self::default()
        }
    }
}
