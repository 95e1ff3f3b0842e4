//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        // find the first `SymExpr::Add`, and distribute every other factor over it
        let idx = factors.iter().position(|factor| matches!(factor, SymExpr::Add(_)))?;
        let SymExpr::Add(terms) = &factors[idx] else {
            return None;
        };
        let mut others = factors.to_vec();
        others.remove(idx);

        let new_terms = terms.iter()
            .map(|term| SymExpr::Mul(others.clone()) * term.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn distribute_number() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::Mul(vec![SymExpr::int(3), SymExpr::Add(vec![x.clone(), SymExpr::int(1)])]);
        assert_eq!(distributive_property(&expr, &mut ()), Some(SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::int(3), x]),
            SymExpr::Mul(vec![SymExpr::int(3), SymExpr::int(1)]),
        ])));
    }

    #[test]
    fn no_sum() {
        let expr = SymExpr::Mul(vec![SymExpr::int(3), SymExpr::symbol("x")]);
        assert!(distributive_property(&expr, &mut ()).is_none());
    }
}
