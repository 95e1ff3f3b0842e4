//! Rules that evaluate parts of an expression made only of numbers.
//!
//! Integer fractions are kept exact: `1/2 + 1/3` folds to `5/6`, not `0.8333...`. A fraction is
//! represented as `n * d^-1`, where `d` is a positive integer coprime to `n`. Results that cannot
//! be represented exactly (such as `sqrt(2)`) are left unevaluated.

use crate::{
    funcs,
    numerical::{ops, policy::Policy, value::Value},
    primitive::{float, int},
};
use crate::symbolic::{
    expr::{SymExpr, Primary},
    simplify::{rules::{do_add, do_multiply, do_power}, step::Step},
    step_collector::StepCollector,
};
use rug::{Float, Integer};

/// If the expression is the reciprocal of a non-zero integer, `d^-1`, returns `d`.
fn as_reciprocal(expr: &SymExpr) -> Option<Integer> {
    let SymExpr::Exp(base, exp) = expr else {
        return None;
    };
    let d = base.as_number().filter(|d| d.is_integer() && !d.is_zero())?;
    if exp.is_int(-1) {
        d.to_integer()
    } else {
        None
    }
}

/// If the expression is an integer, returns it.
fn as_integer(expr: &SymExpr) -> Option<Integer> {
    expr.as_number()
        .filter(|n| n.is_integer())
        .and_then(Float::to_integer)
}

/// If the expression is a fraction of integers (`n`, `d^-1`, or `n * d^-1`), returns the
/// numerator and denominator.
fn as_fraction(expr: &SymExpr) -> Option<(Integer, Integer)> {
    if let Some(n) = as_integer(expr) {
        return Some((n, int(1)));
    }
    if let Some(d) = as_reciprocal(expr) {
        return Some((int(1), d));
    }

    let SymExpr::Mul(factors) = expr else {
        return None;
    };
    match factors.as_slice() {
        [a, b] => as_integer(a).zip(as_reciprocal(b))
            .or_else(|| as_integer(b).zip(as_reciprocal(a))),
        _ => None,
    }
}

/// If the expression is a numeric constant in one of the forms produced by these rules, returns
/// its value.
fn as_constant(expr: &SymExpr) -> Option<Float> {
    if let Some(n) = expr.as_number() {
        return Some(n.clone());
    }
    if let Some((n, d)) = as_fraction(expr) {
        return Some(float(n) / float(d));
    }
    None
}

/// Builds the expression `num / den`, reduced to lowest terms with a positive denominator.
pub(crate) fn make_fraction(num: Integer, den: Integer) -> SymExpr {
    let gcd = num.clone().gcd(&den);
    let (mut num, mut den) = if gcd > 1 {
        (num / &gcd, den / &gcd)
    } else {
        (num, den)
    };
    if den < 0 {
        num = -num;
        den = -den;
    }

    if den == 1 {
        SymExpr::number(float(num))
    } else if num == 1 {
        SymExpr::number(float(den)).recip()
    } else {
        SymExpr::number(float(num)) * SymExpr::number(float(den)).recip()
    }
}

/// Converts a folded [`Value`] back into an expression, if it is a real number.
fn real(value: Value) -> Option<Float> {
    match value {
        Value::Float(n) => Some(n),
        Value::Complex(_) => None,
    }
}

/// `2 + 3 = 5`
/// `1/2 + 1/3 = 5/6`
/// `0.5 + 1/4 = 0.75`
pub fn fold_add(expr: &SymExpr, policy: &Policy, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let (constants, mut rest): (Vec<_>, Vec<_>) = terms.iter()
            .cloned()
            .partition(|term| as_constant(term).is_some());
        if constants.len() < 2 {
            return None;
        }

        let fractions = constants.iter()
            .map(as_fraction)
            .collect::<Option<Vec<_>>>();
        let folded = match fractions {
            Some(fractions) => {
                let (num, den) = fractions.into_iter()
                    .fold((int(0), int(1)), |(a, b), (c, d)| {
                        // a/b + c/d = (ad + bc) / bd
                        (a * &d + c * &b, b * d)
                    });
                ops::checked(Value::Float(float(&num)), policy).ok()?;
                make_fraction(num, den)
            },
            None => {
                let sum = constants.iter()
                    .filter_map(as_constant)
                    .try_fold(Value::from(0), |acc, n| ops::add(acc, Value::Float(n), policy))
                    .ok()?;
                SymExpr::number(real(sum)?)
            },
        };

        rest.push(folded);
        Some(SymExpr::Add(rest).downgrade())
    })?;

    step_collector.push(Step::FoldAdd);
    Some(opt)
}

/// `2 * 3x = 6x`
/// `4 * 1/6 = 2/3`
/// `0.5 * 1/2 = 0.25`
pub fn fold_mul(expr: &SymExpr, policy: &Policy, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut numbers = Vec::new();
        let mut denominators = Vec::new();
        let mut rest = Vec::new();
        for factor in factors {
            if let Some(n) = factor.as_number() {
                numbers.push(n.clone());
            } else if let Some(d) = as_reciprocal(factor) {
                denominators.push(d);
            } else {
                rest.push(factor.clone());
            }
        }

        let num = numbers.into_iter()
            .try_fold(Value::from(1), |acc, n| ops::mul(acc, Value::Float(n), policy))
            .ok()
            .and_then(real)?;
        let count = factors.len() - rest.len();
        let den = denominators.iter().fold(int(1), |acc, d| acc * d);

        let folded = match num.to_integer().filter(|_| num.is_integer()) {
            Some(num) => {
                // a single integer over a single coprime integer is already reduced
                let reducible = num.clone().gcd(&den) != 1 || den < 0;
                if count < 2 || (count == 2 && denominators.len() == 1 && !reducible) {
                    return None;
                }
                make_fraction(num, den)
            },
            None => {
                if count < 2 {
                    return None;
                }
                let value = ops::div(Value::Float(num), Value::Float(float(&den)), policy).ok()?;
                SymExpr::number(real(value)?)
            },
        };

        Some(rest.into_iter()
            .fold(folded, |acc, factor| acc * factor)
            .downgrade())
    })?;

    step_collector.push(Step::FoldMul);
    Some(opt)
}

/// `2^3 = 8`
/// `4^0.5 = 2`
/// `2^-2 = 1/4`
///
/// Powers that do not produce an exact result, such as `2^0.5`, are left alone.
pub fn fold_power(expr: &SymExpr, policy: &Policy, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_number()?;
        let result = ops::pow(Value::Float(base.clone()), Value::Float(exp.clone()), policy)
            .ok()
            .and_then(real)?;

        let whole_exp = exp.is_integer();
        if (whole_exp && !exp.is_sign_negative()) || result.is_integer() {
            return Some(SymExpr::number(result));
        }

        // n^-k = 1 / n^k
        if whole_exp && base.is_integer() && (base.is_sign_negative() || *exp != -1) {
            let positive = ops::pow(Value::Float(base.clone()), Value::Float(-exp.clone()), policy)
                .ok()
                .and_then(real)?;
            return Some(make_fraction(int(1), positive.to_integer()?));
        }

        None
    })?;

    step_collector.push(Step::FoldPower);
    Some(opt)
}

/// `sqrt(16) = 4`
/// `factorial(5) = 120`
///
/// Only calls that produce an integer are folded; `sin(1)` is left alone.
pub fn fold_call(expr: &SymExpr, policy: &Policy, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let SymExpr::Primary(Primary::Call(name, args)) = expr else {
        return None;
    };
    let builtin = funcs::get(name).filter(|builtin| builtin.arity == args.len())?;
    let values = args.iter()
        .map(|arg| arg.as_number().map(|n| Value::Float(n.clone())))
        .collect::<Option<Vec<_>>>()?;
    let result = (builtin.eval)(&values, policy)
        .ok()
        .and_then(real)
        .filter(Float::is_integer)?;

    step_collector.push(Step::FoldCall);
    Some(SymExpr::number(result))
}

/// Applies all folding rules.
pub fn all(expr: &SymExpr, policy: &Policy, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    fold_add(expr, policy, step_collector)
        .or_else(|| fold_mul(expr, policy, step_collector))
        .or_else(|| fold_power(expr, policy, step_collector))
        .or_else(|| fold_call(expr, policy, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn fold(expr: &SymExpr) -> Option<SymExpr> {
        all(expr, &Policy::default(), &mut ())
    }

    #[test]
    fn add_integers() {
        let expr = SymExpr::Add(vec![SymExpr::int(2), x(), SymExpr::int(3)]);
        assert_eq!(fold(&expr), Some(SymExpr::Add(vec![x(), SymExpr::int(5)])));
    }

    #[test]
    fn add_fractions() {
        let expr = SymExpr::Add(vec![
            SymExpr::int(2).recip(),
            SymExpr::int(3).recip(),
        ]);
        assert_eq!(fold(&expr), Some(make_fraction(int(5), int(6))));
    }

    #[test]
    fn add_decimals() {
        let expr = SymExpr::Add(vec![
            SymExpr::number(float(0.5)),
            SymExpr::int(4).recip(),
        ]);
        assert_eq!(fold(&expr), Some(SymExpr::number(float(0.75))));
    }

    #[test]
    fn multiply_integers() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), x(), SymExpr::int(3)]);
        assert_eq!(fold(&expr), Some(SymExpr::Mul(vec![SymExpr::int(6), x()])));
    }

    #[test]
    fn reduce_fraction() {
        let expr = SymExpr::Mul(vec![SymExpr::int(4), SymExpr::int(6).recip()]);
        assert_eq!(fold(&expr), Some(make_fraction(int(2), int(3))));

        let reduced = make_fraction(int(2), int(3));
        assert!(fold(&reduced).is_none());
    }

    #[test]
    fn negative_denominator() {
        assert_eq!(
            make_fraction(int(3), int(-6)),
            SymExpr::int(-1) * SymExpr::int(2).recip(),
        );
    }

    #[test]
    fn powers() {
        assert_eq!(fold(&SymExpr::int(2).pow(SymExpr::int(3))), Some(SymExpr::int(8)));
        assert_eq!(fold(&SymExpr::int(4).pow(SymExpr::number(float(0.5)))), Some(SymExpr::int(2)));
        assert_eq!(fold(&SymExpr::int(2).pow(SymExpr::int(-2))), Some(SymExpr::int(4).recip()));
        assert!(fold(&SymExpr::int(2).pow(SymExpr::number(float(0.5)))).is_none());
        assert!(fold(&SymExpr::int(2).recip()).is_none());
    }

    #[test]
    fn power_of_zero_is_left_alone() {
        assert!(fold(&SymExpr::int(0).pow(SymExpr::int(-1))).is_none());
    }

    #[test]
    fn calls() {
        assert_eq!(fold(&SymExpr::call("sqrt", vec![SymExpr::int(16)])), Some(SymExpr::int(4)));
        assert_eq!(fold(&SymExpr::call("factorial", vec![SymExpr::int(5)])), Some(SymExpr::int(120)));
        assert!(fold(&SymExpr::call("sin", vec![SymExpr::int(1)])).is_none());
        assert!(fold(&SymExpr::call("sqrt", vec![x()])).is_none());
    }
}
