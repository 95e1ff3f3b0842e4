//! Simplification rules for expressions involving addition, including combining like terms.

use crate::primitive::float;
use crate::symbolic::{
    expr::{SymExpr, Primary},
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Float;

/// `a + (b + c) = a + b + c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        Some(terms.iter()
            .cloned()
            .fold(SymExpr::Add(Vec::new()), |acc, term| acc + term)
            .downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenAdd);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_int(0))
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Utility function to extract the numeric coefficient and factors of an expression. If the
/// expression is not [`SymExpr::Mul`], the coefficient is 1.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `2*a*b` -> `(2, a*b)`
/// - `sqrt(6)` -> `(1, sqrt(6))`
pub(crate) fn get_coeff(expr: &SymExpr) -> (Float, SymExpr) {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => (n.clone(), SymExpr::int(1)),
        SymExpr::Mul(factors) => {
            let mut coeff = float(1);
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor.as_number() {
                    Some(n) => coeff *= n,
                    None => rest.push(factor.clone()),
                }
            }
            (coeff, SymExpr::Mul(rest).downgrade())
        },
        other => (float(1), other.clone()),
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut combined: Vec<(Float, SymExpr)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, factors) = get_coeff(term);
            match combined.iter_mut().find(|(_, other)| *other == factors) {
                Some((total, _)) => *total += coeff,
                None => combined.push((coeff, factors)),
            }
        }

        if combined.len() == terms.len() {
            return None;
        }

        let new_terms = combined.into_iter()
            .map(|(coeff, factors)| {
                if coeff == 1 {
                    factors
                } else {
                    SymExpr::number(coeff) * factors
                }
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules, except for flattening.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn flatten_nested() {
        let expr = SymExpr::Add(vec![
            x(),
            SymExpr::Add(vec![SymExpr::symbol("y"), SymExpr::int(1)]),
        ]);
        let flat = flatten(&expr, &mut ()).unwrap();
        assert_eq!(flat, SymExpr::Add(vec![x(), SymExpr::symbol("y"), SymExpr::int(1)]));
        assert!(flatten(&flat, &mut ()).is_none());
    }

    #[test]
    fn remove_zero() {
        let expr = SymExpr::Add(vec![x(), SymExpr::int(0)]);
        let mut steps = Vec::new();
        assert_eq!(add_zero(&expr, &mut steps), Some(x()));
        assert_eq!(steps, vec![Step::AddZero]);
    }

    #[test]
    fn combine_terms() {
        // 2x + x + y
        let expr = SymExpr::Add(vec![
            SymExpr::int(2) * x(),
            x(),
            SymExpr::symbol("y"),
        ]);
        let combined = combine_like_terms(&expr, &mut ()).unwrap();
        assert_eq!(combined, SymExpr::Add(vec![
            SymExpr::int(3) * x(),
            SymExpr::symbol("y"),
        ]));
    }

    #[test]
    fn combine_terms_to_zero() {
        // x - x
        let expr = SymExpr::Add(vec![x(), -x()]);
        let combined = combine_like_terms(&expr, &mut ()).unwrap();
        assert_eq!(combined, SymExpr::Mul(vec![SymExpr::int(0), x()]));
    }

    #[test]
    fn unlike_terms() {
        let expr = SymExpr::Add(vec![x(), x().pow(SymExpr::int(2))]);
        assert!(combine_like_terms(&expr, &mut ()).is_none());
    }
}
