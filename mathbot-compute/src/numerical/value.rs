use rug::{Complex, Float};
use std::fmt::{self, Display, Formatter};
use super::fmt::fmt_float;
use crate::primitive::{complex, float};

/// The result of evaluating an expression: a real or a complex number.
///
/// A [`Value::Complex`] never has an imaginary part of exactly zero once it has passed through
/// [`Value::coerce`]; such values are represented as [`Value::Float`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A real number.
    Float(Float),

    /// A complex number.
    Complex(Complex),
}

impl Value {
    /// Converts a complex number with a zero imaginary part into a real number.
    pub fn coerce(self) -> Self {
        match self {
            Self::Complex(c) if c.imag().is_zero() => {
                let (real, _) = c.into_real_imag();
                Self::Float(real)
            },
            other => other,
        }
    }

    /// Converts the value into a [`Complex`] number.
    pub fn into_complex(self) -> Complex {
        match self {
            Self::Float(n) => complex(n),
            Self::Complex(c) => c,
        }
    }

    /// Returns the value as a [`Float`], if it is real.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Float(n) => Some(n),
            Self::Complex(_) => None,
        }
    }

    /// Returns true if the value is a real number.
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Float(n) => n.is_zero(),
            Self::Complex(c) => c.real().is_zero() && c.imag().is_zero(),
        }
    }

    /// Returns the magnitude of the value.
    pub fn magnitude(&self) -> Float {
        match self {
            Self::Float(n) => n.clone().abs(),
            Self::Complex(c) => float(c.abs_ref()),
        }
    }

    /// Returns true if the two values are equal within the given relative tolerance. Values
    /// that are both within `tolerance` of zero are always equal.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        let diff = (self.clone().into_complex() - other.clone().into_complex()).abs();
        let diff = float(diff.real());
        let scale = self.magnitude().max(&other.magnitude());
        diff <= scale.max(&float(1)) * tolerance
    }
}

impl From<Float> for Value {
    fn from(n: Float) -> Self {
        Self::Float(n)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Self::Complex(c).coerce()
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Float(float(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(float(n))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Float(n) => write!(f, "{}", fmt_float(n)),
            Self::Complex(c) => {
                let real = fmt_float(c.real());
                let imag = fmt_float(c.imag());
                if imag == "0" {
                    return write!(f, "{}", real);
                }

                let imag_abs = fmt_float(&c.imag().clone().abs());
                let imag_abs = if imag_abs == "1" { String::new() } else { imag_abs };
                let negative = c.imag().is_sign_negative();
                if real == "0" {
                    let sign = if negative { "-" } else { "" };
                    write!(f, "{}{}i", sign, imag_abs)
                } else {
                    let sign = if negative { "-" } else { "+" };
                    write!(f, "{} {} {}i", real, sign, imag_abs)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_real() {
        assert_eq!(Value::from(complex((3, 0))), Value::from(3));
        assert!(!Value::from(complex((3, 1))).is_real());
    }

    #[test]
    fn display_real() {
        assert_eq!(Value::from(14).to_string(), "14");
        assert_eq!(Value::from(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn display_complex() {
        assert_eq!(Value::Complex(complex((0, 1))).to_string(), "i");
        assert_eq!(Value::Complex(complex((0, -1))).to_string(), "-i");
        assert_eq!(Value::Complex(complex((0, 2))).to_string(), "2i");
        assert_eq!(Value::Complex(complex((3, -2))).to_string(), "3 - 2i");
        assert_eq!(Value::Complex(complex((1.5, 1))).to_string(), "1.5 + i");
    }

    #[test]
    fn approx() {
        let a = Value::from(2);
        let b = Value::from(2.0 + 1e-12);
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&Value::from(2.1), 1e-9));
    }
}
