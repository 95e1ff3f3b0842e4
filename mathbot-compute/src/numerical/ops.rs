//! Checked arithmetic on [`Value`]s.
//!
//! Every operation here returns a [`NumError`] instead of producing infinities or NaN. The
//! evaluator attaches spans to these errors with [`NumError::into_error`].

use mathbot_error::Error;
use mathbot_parser::parser::token::op::BinOpKind;
use rug::{ops::Pow, Float, Integer};
use std::ops::Range;
use super::{error, policy::{ComplexPolicy, Policy}, value::Value};
use crate::primitive::{complex, float};

/// An error produced by a numeric operation, before it is located in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum NumError {
    /// Division or modulo by exact zero.
    DivisionByZero,

    /// An operation outside of its domain, with a description.
    Domain(String),

    /// An operation on real numbers produced a complex result, and the policy rejects it.
    ComplexResult(&'static str),

    /// A value exceeded the magnitude limit.
    Overflow(String),
}

impl NumError {
    /// Converts this error into an [`Error`] pointing at the given spans.
    pub fn into_error(self, spans: Vec<Range<usize>>) -> Error {
        match self {
            Self::DivisionByZero => Error::new(spans, error::DivisionByZero),
            Self::Domain(reason) => Error::new(spans, error::DomainError { reason }),
            Self::ComplexResult(operation) => Error::new(spans, error::ComplexNotAllowed { operation }),
            Self::Overflow(reason) => Error::new(spans, error::Overflow { reason }),
        }
    }
}

/// Returns true if the float is within the magnitude limit of the policy.
fn in_range(n: &Float, policy: &Policy) -> bool {
    n.is_zero() || n.get_exp().map_or(true, |exp| exp <= policy.max_exponent)
}

/// Checks that a [`Float`] is finite and within the magnitude limit.
fn check_float(n: &Float, policy: &Policy) -> Result<(), NumError> {
    if n.is_nan() {
        Err(NumError::Domain("the result is undefined".to_string()))
    } else if n.is_infinite() || !in_range(n, policy) {
        Err(NumError::Overflow("the result is too large".to_string()))
    } else {
        Ok(())
    }
}

/// Checks that a value is finite and within the magnitude limit. Complex values with a zero
/// imaginary part are converted to real values.
pub fn checked(value: Value, policy: &Policy) -> Result<Value, NumError> {
    match value.coerce() {
        Value::Float(n) => {
            check_float(&n, policy)?;
            Ok(Value::Float(n))
        },
        Value::Complex(c) => {
            check_float(c.real(), policy)?;
            check_float(c.imag(), policy)?;
            Ok(Value::Complex(c))
        },
    }
}

/// Applies the complex policy to the complex result of an operation on real numbers.
pub fn promote(value: Value, policy: &Policy, operation: &'static str) -> Result<Value, NumError> {
    match (value.coerce(), policy.complex) {
        (Value::Complex(_), ComplexPolicy::Reject) => Err(NumError::ComplexResult(operation)),
        (value, _) => checked(value, policy),
    }
}

/// Returns true if the float is an integer, within the tolerance of the policy.
pub fn is_near_integer(n: &Float, policy: &Policy) -> bool {
    let rounded = n.clone().round();
    let scale = n.clone().abs().max(&float(1));
    (n.clone() - rounded).abs() <= scale * policy.tolerance
}

pub fn neg(a: Value) -> Value {
    match a {
        Value::Float(n) => Value::Float(-n),
        Value::Complex(c) => Value::Complex(-c),
    }
}

pub fn add(a: Value, b: Value, policy: &Policy) -> Result<Value, NumError> {
    match (a, b) {
        (Value::Float(a), Value::Float(b)) => checked(Value::Float(a + b), policy),
        (a, b) => checked(Value::Complex(a.into_complex() + b.into_complex()), policy),
    }
}

pub fn sub(a: Value, b: Value, policy: &Policy) -> Result<Value, NumError> {
    add(a, neg(b), policy)
}

pub fn mul(a: Value, b: Value, policy: &Policy) -> Result<Value, NumError> {
    match (a, b) {
        (Value::Float(a), Value::Float(b)) => checked(Value::Float(a * b), policy),
        (a, b) => checked(Value::Complex(a.into_complex() * b.into_complex()), policy),
    }
}

pub fn div(a: Value, b: Value, policy: &Policy) -> Result<Value, NumError> {
    if b.is_zero() {
        return Err(NumError::DivisionByZero);
    }

    match (a, b) {
        (Value::Float(a), Value::Float(b)) => checked(Value::Float(a / b), policy),
        (a, b) => checked(Value::Complex(a.into_complex() / b.into_complex()), policy),
    }
}

/// Computes the floored remainder of `a / b`. The result has the same sign as `b`.
pub fn rem(a: Value, b: Value, policy: &Policy) -> Result<Value, NumError> {
    let (Value::Float(a), Value::Float(b)) = (a, b) else {
        return Err(NumError::Domain("the remainder of a complex number is not defined".to_string()));
    };
    if b.is_zero() {
        return Err(NumError::DivisionByZero);
    }

    let quotient = Float::with_val(a.prec(), &a / &b).floor();
    checked(Value::Float(a - b * quotient), policy)
}

/// Raises `base` to the power of `exp`.
pub fn pow(base: Value, exp: Value, policy: &Policy) -> Result<Value, NumError> {
    if base.is_zero() {
        let exp_real = match &exp {
            Value::Float(n) => n.clone(),
            Value::Complex(c) => c.real().clone(),
        };
        return if exp.is_zero() {
            Ok(Value::from(1))
        } else if exp_real.is_sign_negative() && !exp_real.is_zero() {
            Err(NumError::DivisionByZero)
        } else if exp_real.is_zero() {
            Err(NumError::Domain("zero raised to an imaginary power is not defined".to_string()))
        } else {
            Ok(Value::from(0))
        };
    }

    match (base, exp) {
        (Value::Float(base), Value::Float(exp)) => {
            if base.is_sign_negative() && !exp.is_integer() {
                promote(
                    Value::Complex(complex(base).pow(complex(exp))),
                    policy,
                    "raising a negative number to a fractional power",
                )
            } else {
                checked(Value::Float(base.pow(exp)), policy)
            }
        },
        (base, Value::Float(exp)) if exp.is_integer() && exp.clone().abs() <= i32::MAX => {
            // integer powers are computed by repeated multiplication, so `i^2` is exactly `-1`
            let exp = exp.to_i32_saturating().unwrap_or(0);
            checked(Value::Complex(base.into_complex().pow(exp)), policy)
        },
        (base, exp) => checked(Value::Complex(base.into_complex().pow(exp.into_complex())), policy),
    }
}

/// Computes `n!` for a non-negative integer `n`.
pub fn factorial(n: Value, policy: &Policy) -> Result<Value, NumError> {
    let Value::Float(n) = n else {
        return Err(NumError::Domain("the factorial of a complex number is not defined".to_string()));
    };
    if n.is_sign_negative() && !n.is_zero() {
        return Err(NumError::Domain("the factorial of a negative number is not defined".to_string()));
    }
    if !is_near_integer(&n, policy) {
        return Err(NumError::Domain("the factorial is only defined for integers".to_string()));
    }

    let k = n.round().to_u32_saturating().unwrap_or(u32::MAX);
    if k > policy.max_factorial {
        return Err(NumError::Overflow(format!(
            "the factorial of numbers above {} is too large to compute",
            policy.max_factorial,
        )));
    }

    checked(Value::Float(float(Integer::from(Integer::factorial(k)))), policy)
}

/// Applies a binary operator to two values.
pub fn binary(op: BinOpKind, a: Value, b: Value, policy: &Policy) -> Result<Value, NumError> {
    match op {
        BinOpKind::Add => add(a, b, policy),
        BinOpKind::Sub => sub(a, b, policy),
        BinOpKind::Mul => mul(a, b, policy),
        BinOpKind::Div => div(a, b, policy),
        BinOpKind::Mod => rem(a, b, policy),
        BinOpKind::Exp => pow(a, b, policy),
    }
}
