//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`Expr`](mathbot_parser::parser::ast::expr::Expr) nodes produced by
//! [`mathbot_parser`], with the main difference being that [`SymExpr`] nodes **flatten** out the
//! tree structure: `x + (y + z)` is a single [`SymExpr::Add`] node with _three_ children.
//!
//! This makes it easier to combine "like terms", that is, terms that share the same factors (e.g.
//! `x + x = 2x`), because the terms in question are all at the same level in the tree.
//!
//! Use [`expr::from_ast`] to convert a parsed expression. Conversion is lossy: [`SymExpr`] does
//! not store span information, so errors found while manipulating a [`SymExpr`] are reported as
//! a [`SymbolicError`](error::SymbolicError), and located in the source afterwards.
//!
//! ```
//! use mathbot_compute::numerical::ctxt::Ctxt;
//! use mathbot_compute::symbolic::expr::{from_ast, SymExpr};
//! use mathbot_parser::parser::parse;
//!
//! let ast = parse("x + (y + z)").unwrap();
//! let expr = from_ast(&ast, &Ctxt::default(), None).unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression towards a canonical form by applying the rules in
//! [`simplify::rules`] until none apply. The rules cover constant folding, combining like terms /
//! factors, distributing multiplication over addition, and basic power rules.
//!
//! # Differentiation and solving
//!
//! [`derivative()`] differentiates an expression with respect to a variable, and [`solve()`]
//! finds the roots of linear and quadratic equations.

pub mod derivative;
pub mod error;
pub mod expr;
pub mod simplify;
pub mod solve;
pub mod step_collector;

pub use derivative::derivative;
pub use expr::SymExpr;
pub use simplify::simplify;
pub use solve::solve;
