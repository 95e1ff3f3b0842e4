//! Rounding, comparison, and other functions that are only defined for real numbers, along with
//! the absolute value.

use crate::numerical::{ops::{self, checked, NumError}, policy::Policy, value::Value};
use rug::Float;
use super::{one, two};

/// Returns the argument as a real number, or a domain error naming the function.
fn real<'a>(value: &'a Value, name: &str) -> Result<&'a Float, NumError> {
    value.as_float().ok_or_else(|| {
        NumError::Domain(format!("`{}` is not defined for complex numbers", name))
    })
}

/// The absolute value of a real number, or the modulus of a complex number.
pub fn abs(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    checked(Value::Float(one(args)?.magnitude()), policy)
}

/// Build rounding functions.
macro_rules! build_rounding {
    ($($name:ident; $func:expr),* $(,)?) => {
        $(
            pub fn $name(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
                let n = real(one(args)?, stringify!($name))?.clone();
                checked(Value::Float(($func)(n)), policy)
            }
        )*
    };
}

build_rounding! {
    floor; Float::floor,
    ceil; Float::ceil,
    round; Float::round,
}

pub fn min(args: &[Value], _: &Policy) -> Result<Value, NumError> {
    let (a, b) = two(args)?;
    let (a, b) = (real(a, "min")?, real(b, "min")?);
    Ok(Value::Float(if b < a { b.clone() } else { a.clone() }))
}

pub fn max(args: &[Value], _: &Policy) -> Result<Value, NumError> {
    let (a, b) = two(args)?;
    let (a, b) = (real(a, "max")?, real(b, "max")?);
    Ok(Value::Float(if b > a { b.clone() } else { a.clone() }))
}

/// `mod(a, b)`, the same as `a % b`.
pub fn modulo(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    let (a, b) = two(args)?;
    ops::rem(a.clone(), b.clone(), policy)
}

/// `factorial(n)`, the same as `n!`.
pub fn factorial(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
    ops::factorial(one(args)?.clone(), policy)
}

#[cfg(test)]
mod tests {
    use crate::primitive::complex;
    use super::*;

    #[test]
    fn absolute_value() {
        let policy = Policy::default();
        assert_eq!(abs(&[Value::from(-3)], &policy), Ok(Value::from(3)));
        assert_eq!(abs(&[Value::Complex(complex((3, 4)))], &policy), Ok(Value::from(5)));
    }

    #[test]
    fn rounding() {
        let policy = Policy::default();
        assert_eq!(floor(&[Value::from(-1.5)], &policy), Ok(Value::from(-2)));
        assert_eq!(ceil(&[Value::from(1.2)], &policy), Ok(Value::from(2)));
        assert_eq!(round(&[Value::from(2.5)], &policy), Ok(Value::from(3)));
        assert!(matches!(floor(&[Value::Complex(complex((1, 1)))], &policy), Err(NumError::Domain(_))));
    }

    #[test]
    fn extremes() {
        let policy = Policy::default();
        assert_eq!(min(&[Value::from(2), Value::from(-1)], &policy), Ok(Value::from(-1)));
        assert_eq!(max(&[Value::from(2), Value::from(-1)], &policy), Ok(Value::from(2)));
    }
}
