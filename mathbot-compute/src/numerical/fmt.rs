//! Formatting of numbers for display to the user.

use rug::Float;

/// The number of significant digits shown for non-integral values.
const SIGNIFICANT_DIGITS: usize = 15;

/// Integers with a magnitude smaller than this are printed with every digit.
const EXACT_INTEGER_LIMIT: f64 = 1e21;

/// Formats a [`Float`] for display.
///
/// Integers are printed without a fractional part. Other numbers are rounded to
/// [`SIGNIFICANT_DIGITS`] significant digits, with trailing zeros trimmed, and use scientific
/// notation when they are very large or very small.
pub fn fmt_float(n: &Float) -> String {
    if n.is_zero() {
        return "0".to_string();
    }

    if n.is_integer() && n.clone().abs() < EXACT_INTEGER_LIMIT {
        if let Some(int) = n.to_integer() {
            return int.to_string();
        }
    }

    let value = n.to_f64();
    if value.is_finite() && value != 0.0 {
        fmt_f64(value)
    } else {
        fmt_big(n)
    }
}

/// Formats a finite, non-zero [`f64`] rounded to [`SIGNIFICANT_DIGITS`] digits.
fn fmt_f64(value: f64) -> String {
    let rounded = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value)
        .parse::<f64>()
        .unwrap_or(value);
    let magnitude = rounded.abs();
    if magnitude >= 1e16 || magnitude < 1e-6 {
        format!("{:e}", rounded)
    } else {
        format!("{}", rounded)
    }
}

/// Formats a [`Float`] outside the range of [`f64`] in scientific notation.
fn fmt_big(n: &Float) -> String {
    let digits = n.to_string_radix(10, Some(SIGNIFICANT_DIGITS));
    match digits.split_once(['e', '@']) {
        Some((mantissa, exponent)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.trim_end_matches('0').trim_end_matches('.')
            } else {
                mantissa
            };
            format!("{}e{}", mantissa, exponent.trim_start_matches('+'))
        },
        None => digits,
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::{float, float_from_str};
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(fmt_float(&float(14)), "14");
        assert_eq!(fmt_float(&float(-1024)), "-1024");
        assert_eq!(fmt_float(&float(0)), "0");
        assert_eq!(fmt_float(&float(2).pow(64)), "18446744073709551616");
    }

    #[test]
    fn decimals() {
        assert_eq!(fmt_float(&float(0.5)), "0.5");
        assert_eq!(fmt_float(&(float(1) / float(3))), "0.333333333333333");
        assert_eq!(fmt_float(&(float(2) / float(3))), "0.666666666666667");
    }

    #[test]
    fn rounding_hides_binary_error() {
        let sum = float_from_str("0.1").unwrap() * 3;
        assert_eq!(fmt_float(&sum), "0.3");
    }

    #[test]
    fn scientific() {
        assert_eq!(fmt_float(&float_from_str("1.5e-7").unwrap()), "1.5e-7");
        assert_eq!(fmt_float(&float_from_str("2.5e30").unwrap()), "2.5e30");
    }
}
