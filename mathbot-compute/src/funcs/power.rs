//! Exponential, logarithmic, and root functions.

use crate::{
    consts::TEN,
    numerical::{ops::{self, checked, promote, NumError}, policy::Policy, value::Value},
    primitive::{complex, float},
};
use rug::{ops::Pow, Float};
use super::{one, two};

pub fn exp(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    match one(args)?.clone() {
        Value::Float(n) => checked(Value::Float(n.exp()), policy),
        Value::Complex(c) => checked(Value::Complex(c.exp()), policy),
    }
}

/// Computes the logarithm of the argument in the given base, where `ln_base` is the natural
/// logarithm of the base. Negative arguments have a complex logarithm.
fn logarithm(args: &[Value], policy: &Policy, ln_base: Option<Float>) -> Result<Value, NumError> {
    let arg = one(args)?;
    if arg.is_zero() {
        return Err(NumError::Domain("the logarithm of zero is not defined".to_string()));
    }

    let scale = |c: rug::Complex| match &ln_base {
        Some(ln_base) => c / ln_base,
        None => c,
    };
    match arg.clone() {
        Value::Float(n) if n.is_sign_positive() => {
            let ln = n.ln();
            let result = match &ln_base {
                Some(ln_base) => ln / ln_base,
                None => ln,
            };
            checked(Value::Float(result), policy)
        },
        Value::Float(n) => promote(
            Value::Complex(scale(complex(n).ln())),
            policy,
            "the logarithm of a negative number",
        ),
        Value::Complex(c) => checked(Value::Complex(scale(c.ln())), policy),
    }
}

/// The natural logarithm.
pub fn ln(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    logarithm(args, policy, None)
}

/// The base-10 logarithm.
pub fn log(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    logarithm(args, policy, Some(TEN.clone().ln()))
}

pub fn log2(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    logarithm(args, policy, Some(float(2).ln()))
}

pub fn sqrt(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    match one(args)?.clone() {
        Value::Float(n) if n.is_sign_negative() && !n.is_zero() => promote(
            Value::Complex(complex(n).sqrt()),
            policy,
            "the square root of a negative number",
        ),
        Value::Float(n) => checked(Value::Float(n.sqrt()), policy),
        Value::Complex(c) => checked(Value::Complex(c.sqrt()), policy),
    }
}

/// The real cube root. The cube root of a complex number is its principal root.
pub fn cbrt(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    match one(args)?.clone() {
        Value::Float(n) => checked(Value::Float(n.cbrt()), policy),
        Value::Complex(c) => checked(Value::Complex(c.pow(complex(float(1) / 3))), policy),
    }
}

/// `root(x, n)`, the `n`th root of `x`. Odd integer roots of negative numbers are real.
pub fn root(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    let (x, n) = two(args)?;
    if n.is_zero() {
        return Err(NumError::Domain("the 0th root is not defined".to_string()));
    }

    let exponent = ops::div(Value::from(1), n.clone(), policy)?;
    match (x, n) {
        (Value::Float(x), Value::Float(n)) if x.is_sign_negative() && !x.is_zero() => {
            let is_odd_integer = n.is_integer()
                && (n.clone() % float(2)).abs() == 1;
            if is_odd_integer {
                let magnitude = ops::pow(Value::Float(-x.clone()), exponent, policy)?;
                Ok(ops::neg(magnitude))
            } else {
                let Value::Float(exponent) = exponent else {
                    return Err(NumError::Domain("the root must be real".to_string()));
                };
                promote(
                    Value::Complex(complex(x).pow(complex(exponent))),
                    policy,
                    "an even root of a negative number",
                )
            }
        },
        _ => ops::pow(x.clone(), exponent, policy),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_relative_eq;
    use super::*;

    fn real(value: Value) -> f64 {
        value.as_float().map(Float::to_f64).unwrap_or(f64::NAN)
    }

    #[test]
    fn logarithms() {
        let policy = Policy::default();
        assert_float_relative_eq!(real(log(&[Value::from(1000)], &policy).unwrap()), 3.0);
        assert_float_relative_eq!(real(log2(&[Value::from(8)], &policy).unwrap()), 3.0);
        assert_eq!(ln(&[Value::from(1)], &policy), Ok(Value::from(0)));
    }

    #[test]
    fn logarithm_of_zero() {
        assert!(matches!(ln(&[Value::from(0)], &Policy::default()), Err(NumError::Domain(_))));
        assert!(matches!(log(&[Value::from(0)], &Policy::default()), Err(NumError::Domain(_))));
    }

    #[test]
    fn logarithm_of_negative() {
        let result = ln(&[Value::from(-1)], &Policy::default()).unwrap();
        assert!(!result.is_real());
        assert!(matches!(ln(&[Value::from(-1)], &Policy::real()), Err(NumError::ComplexResult(_))));
    }

    #[test]
    fn square_root_of_negative() {
        let result = sqrt(&[Value::from(-4)], &Policy::default()).unwrap();
        assert_eq!(result.to_string(), "2i");
        assert!(matches!(sqrt(&[Value::from(-4)], &Policy::real()), Err(NumError::ComplexResult(_))));
    }

    #[test]
    fn odd_root_of_negative() {
        let result = root(&[Value::from(-27), Value::from(3)], &Policy::default()).unwrap();
        assert_float_relative_eq!(real(result), -3.0);
        assert_float_relative_eq!(real(cbrt(&[Value::from(-8)], &Policy::default()).unwrap()), -2.0);
    }

    #[test]
    fn even_root_of_negative() {
        let result = root(&[Value::from(-16), Value::from(4)], &Policy::default()).unwrap();
        assert!(!result.is_real());
        assert!(matches!(
            root(&[Value::from(-16), Value::from(4)], &Policy::real()),
            Err(NumError::ComplexResult(_)),
        ));
    }

    #[test]
    fn zeroth_root() {
        assert!(matches!(root(&[Value::from(4), Value::from(0)], &Policy::default()), Err(NumError::Domain(_))));
    }
}
