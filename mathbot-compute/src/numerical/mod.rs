//! Numerical evaluation of expressions.
//!
//! Every parsed [`Expr`](mathbot_parser::parser::ast::Expr) can be evaluated to a [`Value`] with
//! the [`Eval`] trait, given a [`Ctxt`] holding the variable bindings and the [`Policy`] that
//! bounds the evaluation.
//!
//! [`Value`]: value::Value
//! [`Eval`]: eval::Eval
//! [`Ctxt`]: ctxt::Ctxt
//! [`Policy`]: policy::Policy

pub mod ctxt;
pub mod error;
pub mod eval;
pub mod fmt;
pub mod ops;
pub mod policy;
pub mod value;
