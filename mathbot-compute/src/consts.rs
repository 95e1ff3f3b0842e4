//! Named constants available in every expression. This module consists of static constants that
//! return [`Float`]s and [`Complex`] numbers with the given value.

use once_cell::sync::Lazy;
use rug::{Complex, Float};
use super::{numerical::value::Value, primitive::{complex, float}};

pub static TEN: Lazy<Float> = Lazy::new(|| float(10));

/// The imaginary unit.
pub static I: Lazy<Complex> = Lazy::new(|| complex((0, 1)));

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

/// The golden ratio.
pub static PHI: Lazy<Float> = Lazy::new(|| (float(1) + float(5).sqrt()) / float(2));

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

pub static TAU: Lazy<Float> = Lazy::new(|| float(2) * &*PI);

/// The names of all constants, in alphabetical order.
pub const NAMES: [&str; 5] = ["e", "i", "phi", "pi", "tau"];

/// Returns the value of the constant with the given name, if it exists.
pub fn get(name: &str) -> Option<Value> {
    match name {
        "i" => Some(Value::Complex(I.clone())),
        "e" => Some(Value::Float(E.clone())),
        "phi" => Some(Value::Float(PHI.clone())),
        "pi" => Some(Value::Float(PI.clone())),
        "tau" => Some(Value::Float(TAU.clone())),
        _ => None,
    }
}
