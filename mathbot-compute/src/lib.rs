//! Evaluation and algebra for calculator expressions.
//!
//! The [`numerical`] module evaluates parsed expressions to real or complex numbers, and the
//! [`symbolic`] module simplifies, differentiates, and solves them. Most callers only need the
//! functions in [`api`], which are re-exported here:
//!
//! ```
//! use mathbot_compute::{compute, derivative, solve_equation, Bindings, Value};
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("x".to_string(), Value::from(5));
//! assert_eq!(compute("2x + 1", &bindings).unwrap().to_string(), "11");
//!
//! assert_eq!(derivative("x^2 + 3x", "x").unwrap(), "2x + 3");
//!
//! let solution = solve_equation("x^2 - 5x + 6", "x").unwrap();
//! assert_eq!(solution.roots().len(), 2);
//! ```

pub mod api;
pub mod consts;
pub mod funcs;
pub mod numerical;
pub mod primitive;
pub mod symbolic;

pub use api::{
    compute,
    compute_with,
    derivative,
    derivative_with,
    simplify,
    simplify_with_steps,
    solve_equation,
    solve_equation_with,
};
pub use numerical::{
    ctxt::{Bindings, Ctxt},
    policy::{ComplexPolicy, Policy},
    value::Value,
};
pub use symbolic::{
    simplify::step::Step,
    solve::{RootKind, Solution, step::SolveStep},
    step_collector::StepCollector,
};
