//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `a * (b * c) = a * b * c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        Some(factors.iter()
            .cloned()
            .fold(SymExpr::Mul(Vec::new()), |acc, factor| acc * factor)
            .downgrade())
    })?;

    step_collector.push(Step::FlattenMul);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(|factor| factor.is_int(0)) {
            Some(SymExpr::int(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_int(1))
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Utility function to extract the base and exponent of a factor. If the factor is not
/// [`SymExpr::Exp`], the exponent is 1.
fn get_exp(factor: &SymExpr) -> (SymExpr, SymExpr) {
    match factor {
        SymExpr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
        other => (other.clone(), SymExpr::int(1)),
    }
}

/// Combines like factors. Numbers are left alone; they are multiplied together by the folding
/// rules.
///
/// `a*a = a^2`
/// `a*a^2 = a^3`
/// `a^b*a^c = a^(b+c)`
/// etc.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut combined: Vec<(SymExpr, Vec<SymExpr>)> = Vec::with_capacity(factors.len());
        for factor in factors {
            if factor.is_number() {
                combined.push((factor.clone(), Vec::new()));
                continue;
            }

            let (base, exp) = get_exp(factor);
            let existing = combined.iter_mut()
                .find(|(other, exps)| !exps.is_empty() && *other == base);
            match existing {
                Some((_, exps)) => exps.push(exp),
                None => combined.push((base, vec![exp])),
            }
        }

        if combined.len() == factors.len() {
            return None;
        }

        let new_factors = combined.into_iter()
            .map(|(base, mut exps)| match exps.len() {
                0 => base,
                1 if exps[0].is_int(1) => base,
                1 => base.pow(exps.remove(0)),
                _ => base.pow(SymExpr::Add(exps)),
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules, except for flattening.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn zero_absorbs() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::int(0), SymExpr::symbol("y")]);
        assert_eq!(multiply_zero(&expr, &mut ()), Some(SymExpr::int(0)));
    }

    #[test]
    fn remove_one() {
        let expr = SymExpr::Mul(vec![SymExpr::int(1), x()]);
        assert_eq!(multiply_one(&expr, &mut ()), Some(x()));
    }

    #[test]
    fn combine_factors() {
        // x * y * x^2
        let expr = SymExpr::Mul(vec![x(), SymExpr::symbol("y"), x().pow(SymExpr::int(2))]);
        let mut steps = Vec::new();
        let combined = combine_like_factors(&expr, &mut steps).unwrap();
        assert_eq!(combined, SymExpr::Mul(vec![
            x().pow(SymExpr::Add(vec![SymExpr::int(1), SymExpr::int(2)])),
            SymExpr::symbol("y"),
        ]));
        assert_eq!(steps, vec![Step::CombineLikeFactors]);
    }

    #[test]
    fn numbers_left_alone() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::int(3), x()]);
        assert!(combine_like_factors(&expr, &mut ()).is_none());
    }
}
