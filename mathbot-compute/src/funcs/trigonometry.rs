//! Trigonometric and hyperbolic trigonometric functions. All angles are in radians.

use crate::{
    numerical::{ops::{checked, promote, NumError}, policy::Policy, value::Value},
    primitive::complex,
};
use rug::{Complex, Float};
use super::one;

/// Build functions of a single argument that are defined for every real and complex number.
macro_rules! build_total {
    ($($name:ident; $real:expr, $complex:expr),* $(,)?) => {
        $(
            pub fn $name(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
                match one(args)?.clone() {
                    Value::Float(n) => checked(Value::Float(($real)(n)), policy),
                    Value::Complex(c) => checked(Value::Complex(($complex)(c)), policy),
                }
            }
        )*
    };
}

build_total! {
    sin; Float::sin, Complex::sin,
    cos; Float::cos, Complex::cos,
    tan; Float::tan, Complex::tan,
    atan; Float::atan, Complex::atan,
    sinh; Float::sinh, Complex::sinh,
    cosh; Float::cosh, Complex::cosh,
    tanh; Float::tanh, Complex::tanh,
}

/// Build inverse functions that are only real on `[-1, 1]`.
macro_rules! build_bounded {
    ($($name:ident; $real:expr, $complex:expr, $operation:literal),* $(,)?) => {
        $(
            pub fn $name(args: &[Value], policy: &Policy) -> Result<Value, NumError> {
                match one(args)?.clone() {
                    Value::Float(n) if n.clone().abs() <= 1 => checked(Value::Float(($real)(n)), policy),
                    Value::Float(n) => promote(Value::Complex(($complex)(complex(n))), policy, $operation),
                    Value::Complex(c) => checked(Value::Complex(($complex)(c)), policy),
                }
            }
        )*
    };
}

build_bounded! {
    asin; Float::asin, Complex::asin, "the arcsine of a number outside [-1, 1]",
    acos; Float::acos, Complex::acos, "the arccosine of a number outside [-1, 1]",
}
