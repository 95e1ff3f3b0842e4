//! Functions to construct [`Integer`]s, [`Float`]s, and [`Complex`] numbers from various types.

use rug::{Assign, Complex, Float, Integer};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice containing a decimal number, such as `1.5e-3`. Returns
/// [`None`] if the string is not a valid number.
///
/// The fraction digits after the decimal point are optional, so `1.` and `1.e3` are accepted.
pub fn float_from_str(s: &str) -> Option<Float> {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(index) => s.split_at(index),
        None => (s, ""),
    };
    let normalized = match mantissa.strip_suffix('.') {
        Some(whole) => format!("{}{}", whole, exponent),
        None => s.to_string(),
    };
    Float::parse(normalized).ok().map(|parsed| Float::with_val(PRECISION, parsed))
}

/// Creates a [`Complex`] with the given value.
pub fn complex<T>(n: T) -> Complex
where
    Complex: Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal() {
        assert_eq!(float_from_str("0.25"), Some(float(0.25)));
        assert_eq!(float_from_str("1.5e3"), Some(float(1500)));
        assert_eq!(float_from_str("abc"), None);
        assert_eq!(float_from_str("1."), Some(float(1)));
        assert_eq!(float_from_str("2.e2"), Some(float(200)));
    }

    #[test]
    fn decimal_keeps_precision() {
        // 0.1 is parsed directly at full precision, not through an f64
        let tenth = float_from_str("0.1").unwrap();
        assert_ne!(tenth, float(0.1f64));
        assert_eq!(tenth * 10, 1);
    }
}
