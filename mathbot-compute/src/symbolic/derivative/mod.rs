//! Symbolic differentiation.
//!
//! [`derivative`] applies the sum, product, power, and chain rules by structural recursion over
//! a [`SymExpr`], then simplifies the result. Symbols other than the variable of differentiation
//! are treated as constants, so the result is a partial derivative.
//!
//! The symbol `e` is taken to be Euler's number, so `e^x` differentiates to `e^x`.

pub mod function;

use crate::{funcs, numerical::policy::Policy, primitive::float};
use super::{
    error::SymbolicError,
    expr::{Primary, SymExpr},
    simplify::simplify,
};

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up the
/// raw derivative and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => n.is_zero(),
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exp) => {
            is_trivially_zero(base)
                && exp.as_number().is_some_and(|n| n.is_sign_positive() && !n.is_zero())
        },
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up the
/// raw derivative and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 1,
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exp) => exp.is_int(0) || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::int(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `ln(base)`, where `ln(e)` is 1.
fn ln_of(base: &SymExpr) -> SymExpr {
    if base.as_symbol() == Some("e") {
        SymExpr::int(1)
    } else {
        SymExpr::call("ln", vec![base.clone()])
    }
}

/// Computes the raw derivative of an expression, with respect to a single variable.
struct Differentiator<'a> {
    with: &'a str,
    policy: &'a Policy,
}

impl Differentiator<'_> {
    /// `(f + g)' = f' + g'`
    fn sum_rule(&self, terms: &[SymExpr], depth: usize) -> Result<SymExpr, SymbolicError> {
        let mut sum = SumBuilder::default();
        for term in terms {
            sum.add(self.derivative(term, depth + 1)?);
        }
        Ok(sum.into())
    }

    /// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
    fn product_rule(&self, product: &[SymExpr], depth: usize) -> Result<SymExpr, SymbolicError> {
        let mut outer_sum = SumBuilder::default();

        for derivative_index in 0..product.len() {
            let mut inner_mult = MultBuilder::default();
            for (term_index, term) in product.iter().enumerate() {
                if derivative_index == term_index {
                    inner_mult.mult(self.derivative(term, depth + 1)?);
                } else {
                    inner_mult.mult(term.clone());
                }
            }

            outer_sum.add(inner_mult.into());
        }

        Ok(outer_sum.into())
    }

    /// - `(u^n)' = n u^(n - 1) u'`
    /// - `(a^u)' = a^u ln(a) u'`
    /// - `(u^v)' = u^v (v' ln(u) + v u' / u)`
    fn power_rule(&self, base: &SymExpr, exp: &SymExpr, depth: usize) -> Result<SymExpr, SymbolicError> {
        let mut product = MultBuilder::default();
        match (base.contains_symbol(self.with), exp.contains_symbol(self.with)) {
            (false, false) => return Ok(SymExpr::int(0)),
            (true, false) => {
                product.mult(function::power(base, exp));
                product.mult(self.derivative(base, depth + 1)?);
            },
            (false, true) => {
                product.mult(base.clone().pow(exp.clone()));
                product.mult(ln_of(base));
                product.mult(self.derivative(exp, depth + 1)?);
            },
            (true, true) => {
                let mut first = MultBuilder::default();
                first.mult(self.derivative(exp, depth + 1)?);
                first.mult(ln_of(base));

                let mut second = MultBuilder::default();
                second.mult(exp.clone());
                second.mult(self.derivative(base, depth + 1)?);
                second.mult(base.clone().recip());

                let mut sum = SumBuilder::default();
                sum.add(first.into());
                sum.add(second.into());

                product.mult(base.clone().pow(exp.clone()));
                product.mult(sum.into());
            },
        }
        Ok(product.into())
    }

    /// `f(u)' = f'(u) u'`, for builtin functions with a known derivative
    fn chain_rule(&self, name: &str, args: &[SymExpr], depth: usize) -> Result<SymExpr, SymbolicError> {
        if !args.iter().any(|arg| arg.contains_symbol(self.with)) {
            return Ok(SymExpr::int(0));
        }

        let rule = funcs::get(name)
            .filter(|builtin| builtin.arity == 1)
            .and_then(|builtin| builtin.derivative)
            .ok_or_else(|| SymbolicError::NoDerivative(name.to_string()))?;

        let mut product = MultBuilder::default();
        product.mult(rule(&args[0]));
        product.mult(self.derivative(&args[0], depth + 1)?);
        Ok(product.into())
    }

    fn derivative(&self, f: &SymExpr, depth: usize) -> Result<SymExpr, SymbolicError> {
        if depth > self.policy.max_depth {
            return Err(SymbolicError::DepthExceeded);
        }

        let expr = match f {
            SymExpr::Primary(Primary::Number(_)) => SymExpr::int(0),
            SymExpr::Primary(Primary::Symbol(sym)) => {
                if sym == self.with {
                    SymExpr::int(1)
                } else {
                    SymExpr::int(0)
                }
            },
            SymExpr::Primary(Primary::Call(name, args)) => self.chain_rule(name, args, depth)?,
            SymExpr::Add(terms) => self.sum_rule(terms, depth)?,
            SymExpr::Mul(factors) => self.product_rule(factors, depth)?,
            SymExpr::Exp(base, exp) => self.power_rule(base, exp, depth)?,
        };

        if is_trivially_zero(&expr) {
            Ok(SymExpr::number(float(0)))
        } else {
            Ok(expr)
        }
    }
}

/// Computes the derivative of the given expression with respect to the variable `with`, and
/// simplifies it.
///
/// Returns [`SymbolicError::NoDerivative`] if the expression contains a function of `with` with
/// no known derivative.
pub fn derivative(f: &SymExpr, with: &str, policy: &Policy) -> Result<SymExpr, SymbolicError> {
    let raw = Differentiator { with, policy }.derivative(f, 0)?;
    simplify(&raw, policy)
}

#[cfg(test)]
mod tests {
    use mathbot_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use crate::numerical::{ctxt::Ctxt, value::Value};
    use crate::symbolic::expr::from_ast;
    use super::*;

    fn convert(source: &str) -> SymExpr {
        from_ast(&parse(source).unwrap(), &Ctxt::default(), Some("x")).unwrap()
    }

    fn differentiate(source: &str) -> Result<String, SymbolicError> {
        derivative(&convert(source), "x", &Policy::default()).map(|expr| expr.to_string())
    }

    /// Evaluates the expression with `x` bound to the given value.
    fn eval_x(expr: &SymExpr, x: f64) -> f64 {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", Value::from(x));
        match expr.eval(&ctxt).unwrap() {
            Value::Float(n) => n.to_f64(),
            Value::Complex(c) => panic!("expected a real value, got {}", c),
        }
    }

    /// Checks the symbolic derivative against a central finite difference at each point.
    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        const DX: f64 = 1e-6;
        const TOL: f64 = 1e-4;

        let expr = convert(function);
        let symbolic = derivative(&expr, "x", &Policy::default()).unwrap();

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = (eval_x(&expr, point + DX) - eval_x(&expr, point - DX)) / (2.0 * DX);
            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "for \"{function}\" at x={point}, symbolic derivative `{symbolic}` was {symbolically_computed}, but the finite difference was {numerically_computed}",
            );
        }
    }

    #[test]
    fn polynomial() {
        assert_eq!(differentiate("x^2 + 3x"), Ok("2x + 3".to_string()));
        assert_eq!(differentiate("5"), Ok("0".to_string()));
        assert_eq!(differentiate("x"), Ok("1".to_string()));
        assert_eq!(differentiate("1/x"), Ok("-1/x^2".to_string()));
    }

    #[test]
    fn other_symbols_are_constant() {
        assert_eq!(differentiate("x*y"), Ok("y".to_string()));
        assert_eq!(differentiate("y^2"), Ok("0".to_string()));
    }

    #[test]
    fn chain_rule() {
        assert_eq!(differentiate("sin(x)"), Ok("cos(x)".to_string()));
        assert_eq!(differentiate("cos(2x)"), Ok("-2sin(2x)".to_string()));
        assert_eq!(differentiate("ln(x)"), Ok("1/x".to_string()));
    }

    #[test]
    fn exponentials() {
        assert_eq!(differentiate("e^x"), Ok("e^x".to_string()));
        assert_eq!(differentiate("2^x"), Ok("2^x*ln(2)".to_string()));
        assert_eq!(differentiate("x^x"), Ok("x^x*ln(x) + x^x".to_string()));
    }

    #[test]
    fn no_derivative() {
        assert_eq!(differentiate("f(x)"), Err(SymbolicError::NoDerivative("f".to_string())));
        assert_eq!(differentiate("floor(x)"), Err(SymbolicError::NoDerivative("floor".to_string())));
        assert_eq!(differentiate("max(x, 1)"), Err(SymbolicError::NoDerivative("max".to_string())));
    }

    #[test]
    fn constant_call() {
        assert_eq!(differentiate("floor(y) + x"), Ok("1".to_string()));
    }

    #[test]
    fn numeric_agreement() {
        test_for_function("x^2 + x + 1", [0.0, 1.0, 2.0, 5.0, 8.0]);
        test_for_function("x^3 / (x + 1)", [0.5, 1.0, 3.0]);
        test_for_function("sin(x) * cos(x)", [0.0, 0.5, 2.0]);
        test_for_function("tan(x) + atan(x)", [0.1, 0.7]);
        test_for_function("asin(x) + acos(x / 2)", [0.1, 0.5]);
        test_for_function("sinh(x) + cosh(x) + tanh(x)", [0.0, 1.0]);
        test_for_function("exp(2x) + ln(x) + log(x) + log2(x)", [0.5, 2.0]);
        test_for_function("sqrt(x) + cbrt(x) + abs(x)", [0.5, 4.0]);
        test_for_function("x^x", [0.5, 2.0]);
        test_for_function("3^(x^2)", [0.0, 0.5, 1.0]);
    }

    #[test]
    fn depth_limit() {
        let policy = Policy {
            max_depth: 1,
            ..Default::default()
        };
        let expr = convert("sin(cos(tan(x)))");
        assert_eq!(derivative(&expr, "x", &policy), Err(SymbolicError::DepthExceeded));
    }
}
