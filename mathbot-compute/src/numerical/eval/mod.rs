mod binary;
mod call;
mod expr;
mod literal;
mod unary;

use mathbot_error::Error;
use super::{ctxt::Ctxt, value::Value};

/// Any type that can be evaluated to produce a value.
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        self.eval_at(ctxt, 0)
    }

    /// Evaluate the expression at the given recursion depth. Implementations pass `depth + 1` to
    /// the sub-expressions they evaluate.
    fn eval_at(&self, ctxt: &Ctxt, depth: usize) -> Result<Value, Error>;

    /// Evaluate the expression to produce a value, using the default context.
    fn eval_default(&self) -> Result<Value, Error> {
        self.eval(&Ctxt::default())
    }
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_relative_eq;
    use crate::{
        consts,
        numerical::policy::Policy,
        primitive::float,
    };
    use mathbot_error::ErrorClass;
    use mathbot_parser::parser::parse;
    use rug::ops::Pow;
    use super::*;

    fn eval_str(source: &str) -> Result<Value, Error> {
        parse(source)?.eval_default()
    }

    fn eval_with(source: &str, vars: &[(&str, i32)]) -> Result<Value, Error> {
        let mut ctxt = Ctxt::default();
        for (name, value) in vars {
            ctxt.add_var(name, Value::from(*value));
        }
        parse(source)?.eval(&ctxt)
    }

    fn real(value: Value) -> f64 {
        value.as_float().map(rug::Float::to_f64).unwrap_or(f64::NAN)
    }

    #[test]
    fn binary_expr() {
        assert_eq!(eval_str("1 + 2").unwrap(), Value::from(3));
        assert_eq!(eval_str("2 + 3 * 4").unwrap(), Value::from(14));
        assert_eq!(eval_str("(2 + 3) * 4").unwrap(), Value::from(20));
        assert_eq!(eval_str("2^10").unwrap(), Value::from(1024));
    }

    #[test]
    fn binary_and_unary() {
        assert_eq!(eval_str("3 * -5 / 5! + 6").unwrap(), Value::from(5.875));
        assert_eq!(eval_str("-2^2").unwrap(), Value::from(-4));
        assert_eq!(eval_str("2^-1").unwrap(), Value::from(0.5));
    }

    #[test]
    fn right_associative_power() {
        assert_eq!(eval_str("2^3^2").unwrap(), Value::from(512));
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(eval_with("2x", &[("x", 5)]).unwrap(), Value::from(10));
        assert_eq!(eval_with("2-3x", &[("x", 1)]).unwrap(), Value::from(-1));
        assert_eq!(eval_with("x(x+1)", &[("x", 3)]).unwrap(), Value::from(12));
        assert_eq!(eval_str("(1+1)(2+2)").unwrap(), Value::from(8));
    }

    #[test]
    fn precision() {
        let expected = Value::Float(consts::E.clone().pow(2) - &*consts::TAU);
        assert_eq!(eval_str("e^2 - tau").unwrap(), expected);
        assert_eq!(eval_str("0.1 + 0.2").unwrap().to_string(), "0.3");
    }

    #[test]
    fn constants() {
        let result = eval_str("90 * 2 * pi / 360").unwrap();
        assert!(result.approx_eq(&Value::Float(float(&*consts::PI) / 2), 1e-30));
        assert_eq!(eval_str("i^2").unwrap(), Value::from(-1));
    }

    #[test]
    fn modulo() {
        assert_eq!(eval_str("7 % 3").unwrap(), Value::from(1));
        assert_eq!(eval_str("-7 % 3").unwrap(), Value::from(2));
        assert_eq!(eval_str("mod(7, -3)").unwrap(), Value::from(-2));
    }

    #[test]
    fn function_calls() {
        assert_eq!(eval_str("sqrt(16)").unwrap(), Value::from(4));
        assert_eq!(eval_str("max(1, 2) + min(3, 4)").unwrap(), Value::from(5));
        assert_float_relative_eq!(real(eval_str("root(27, 3)").unwrap()), 3.0);
        assert_float_relative_eq!(real(eval_str("sin(pi / 6)").unwrap()), 0.5);
    }

    #[test]
    fn complex_promotion() {
        assert_eq!(eval_str("sqrt(-4)").unwrap().to_string(), "2i");

        let ctxt = Ctxt::new(Policy::real());
        let err = parse("sqrt(-4)").unwrap().eval(&ctxt).unwrap_err();
        assert_eq!(err.class(), ErrorClass::DomainError);
    }

    #[test]
    fn division_by_zero() {
        let err = eval_str("1/0").unwrap_err();
        assert_eq!(err.class(), ErrorClass::DivisionByZero);
        assert_eq!(err.spans, vec![2..3]);

        let err = eval_str("5 % (2 - 2)").unwrap_err();
        assert_eq!(err.class(), ErrorClass::DivisionByZero);
        assert_eq!(err.spans, vec![4..11]);
    }

    #[test]
    fn undefined_variable() {
        let err = eval_str("y+1").unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnknownIdentifier);
        assert_eq!(err.offset(), 0);
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn undefined_function() {
        let err = eval_str("sqr(4)").unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnknownIdentifier);
        assert_eq!(err.spans, vec![0..3]);
    }

    #[test]
    fn wrong_arity() {
        let err = eval_str("sqrt(1, 2)").unwrap_err();
        assert_eq!(err.class(), ErrorClass::ArityMismatch);
        assert_eq!(err.spans, vec![0..5, 9..10]);

        let err = eval_str("root(8)").unwrap_err();
        assert_eq!(err.class(), ErrorClass::ArityMismatch);
    }

    #[test]
    fn factorial_domain() {
        assert_eq!(eval_str("5!").unwrap(), Value::from(120));
        assert_eq!(eval_str("(-1)!").unwrap_err().class(), ErrorClass::DomainError);
        assert_eq!(eval_str("2.5!").unwrap_err().class(), ErrorClass::DomainError);
        assert_eq!(eval_str("5000!").unwrap_err().class(), ErrorClass::Overflow);
    }

    #[test]
    fn overflow() {
        assert_eq!(eval_str("10^100000").unwrap_err().class(), ErrorClass::Overflow);
        assert_eq!(eval_str("1e99999").unwrap_err().class(), ErrorClass::Overflow);
        assert_eq!(eval_str("9^9^9").unwrap_err().class(), ErrorClass::Overflow);
    }

    #[test]
    fn depth_limit() {
        let policy = Policy { max_depth: 8, ..Policy::default() };
        let ctxt = Ctxt::new(policy);
        let source = "1+".repeat(20) + "1";
        let err = parse(&source).unwrap().eval(&ctxt).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Overflow);
    }

    #[test]
    fn deterministic() {
        let a = eval_str("sin(1)^2 + cos(1)^2 + pi^e").unwrap();
        let b = eval_str("sin(1)^2 + cos(1)^2 + pi^e").unwrap();
        assert_eq!(a, b);
    }
}
