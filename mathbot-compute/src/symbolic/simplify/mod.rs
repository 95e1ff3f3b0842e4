//! Algebraic simplification of symbolic expressions.
//!
//! Simplification is done by applying a set of rewrite rules (see [`rules`]) to every
//! sub-expression, bottom-up, until no rule applies anymore. Each rule only ever makes an
//! expression "smaller" in some sense (fewer terms, fewer factors, less nesting), so the process
//! reaches a fixed point; as a backstop, the total number of rewrites is capped by
//! [`Policy::max_rewrites`]. Reaching the cap is not an error: the partially simplified
//! expression is returned as is.
//!
//! Finally, the terms and factors of the result are put in a canonical order: numeric
//! coefficients come first in a product, and numeric constants come last in a sum. The relative
//! order of everything else is kept.
//!
//! Simplification preserves the value of the expression wherever the original expression is
//! defined. Some rules can extend the domain of an expression: `x/x` simplifies to `1`, even
//! though it is undefined at `x = 0`.
//!
//! # Example
//!
//! ```
//! use mathbot_compute::numerical::{ctxt::Ctxt, policy::Policy};
//! use mathbot_compute::symbolic::{expr::from_ast, simplify::simplify};
//! use mathbot_parser::parser::parse;
//!
//! let ast = parse("2x + 3x - 4 + 1").unwrap();
//! let expr = from_ast(&ast, &Ctxt::default(), Some("x")).unwrap();
//! let simplified = simplify(&expr, &Policy::default()).unwrap();
//! assert_eq!(simplified.to_string(), "5x - 3");
//! ```

pub mod rules;
pub mod step;

use crate::numerical::policy::Policy;
use super::{
    error::SymbolicError,
    expr::{Primary, SymExpr},
    step_collector::StepCollector,
};
use step::Step;

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr, policy: &Policy) -> Result<SymExpr, SymbolicError> {
    simplify_with(expr, policy, &mut ())
}

/// Simplifies the given expression, and returns the steps taken to simplify it.
pub fn simplify_with_steps(expr: &SymExpr, policy: &Policy) -> Result<(SymExpr, Vec<Step>), SymbolicError> {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, policy, &mut steps)?;
    Ok((simplified, steps))
}

/// Simplifies the given expression, reporting every rule applied to the given step collector.
pub fn simplify_with(
    expr: &SymExpr,
    policy: &Policy,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, SymbolicError> {
    let mut simplifier = Simplifier {
        policy,
        rewrites: 0,
        step_collector,
    };
    let simplified = simplifier.simplify(expr, 0)?;
    Ok(order(simplified))
}

/// State shared by the whole simplification of one expression.
struct Simplifier<'a> {
    policy: &'a Policy,
    rewrites: usize,
    step_collector: &'a mut dyn StepCollector<Step>,
}

impl Simplifier<'_> {
    /// Simplifies the children of the expression, then applies rules to the expression until none
    /// apply.
    fn simplify(&mut self, expr: &SymExpr, depth: usize) -> Result<SymExpr, SymbolicError> {
        if depth > self.policy.max_depth {
            return Err(SymbolicError::DepthExceeded);
        }

        let mut current = self.simplify_children(expr, depth)?;
        while self.rewrites < self.policy.max_rewrites {
            let Some(next) = rules::all(&current, self.policy, &mut *self.step_collector) else {
                break;
            };
            self.rewrites += 1;

            // a rule can produce new, unsimplified children, such as the sum of exponents from
            // `a * a = a^(1 + 1)`
            current = self.simplify_children(&next, depth)?;
        }

        Ok(current)
    }

    fn simplify_all(&mut self, exprs: &[SymExpr], depth: usize) -> Result<Vec<SymExpr>, SymbolicError> {
        exprs.iter()
            .map(|expr| self.simplify(expr, depth + 1))
            .collect()
    }

    fn simplify_children(&mut self, expr: &SymExpr, depth: usize) -> Result<SymExpr, SymbolicError> {
        Ok(match expr {
            SymExpr::Primary(Primary::Call(name, args)) => {
                SymExpr::call(name, self.simplify_all(args, depth)?)
            },
            SymExpr::Primary(_) => expr.clone(),
            SymExpr::Add(terms) => SymExpr::Add(self.simplify_all(terms, depth)?),
            SymExpr::Mul(factors) => SymExpr::Mul(self.simplify_all(factors, depth)?),
            SymExpr::Exp(base, exp) => {
                let base = self.simplify(base, depth + 1)?;
                let exp = self.simplify(exp, depth + 1)?;
                base.pow(exp)
            },
        })
    }
}

/// Returns true if the expression is a numeric constant, such as `2` or `2/3`.
fn is_constant(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Number(_)) => true,
        SymExpr::Exp(base, exp) => base.is_number() && exp.is_number(),
        SymExpr::Mul(factors) => factors.iter().all(is_constant),
        _ => false,
    }
}

/// Puts the terms and factors of the expression in canonical order.
fn order(expr: SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            SymExpr::call(&name, args.into_iter().map(order).collect())
        },
        SymExpr::Primary(_) => expr,
        SymExpr::Add(terms) => {
            let mut terms = terms.into_iter().map(order).collect::<Vec<_>>();
            terms.sort_by_key(is_constant);
            SymExpr::Add(terms)
        },
        SymExpr::Mul(factors) => {
            let mut factors = factors.into_iter().map(order).collect::<Vec<_>>();
            factors.sort_by_key(|factor| !factor.is_number());
            SymExpr::Mul(factors)
        },
        SymExpr::Exp(base, exp) => order(*base).pow(order(*exp)),
    }
}
