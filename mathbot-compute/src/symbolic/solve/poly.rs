//! Extraction of polynomial coefficients from a simplified expression.

use rug::{Complex, Float};
use crate::{numerical::ctxt::Ctxt, primitive::{complex, float}};
use crate::symbolic::{error::SymbolicError, expr::{Primary, SymExpr}};

/// The highest degree an intermediate polynomial may reach. Only linear and quadratic equations
/// are solved; this bounds the work done before finding out the degree is too high.
const MAX_DEGREE: usize = 32;

/// An error that occurred while extracting a polynomial.
#[derive(Debug, Clone, PartialEq)]
pub enum PolyError {
    /// The expression is not a polynomial in the variable, with a description of why.
    NotPolynomial(String),

    /// Part of the expression that does not depend on the variable could not be evaluated.
    Symbolic(SymbolicError),
}

impl From<SymbolicError> for PolyError {
    fn from(err: SymbolicError) -> Self {
        Self::Symbolic(err)
    }
}

/// A polynomial in a single variable with complex coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly(Vec<Complex>);

impl Poly {
    fn constant(c: Complex) -> Self {
        Self(vec![c])
    }

    fn var() -> Self {
        Self(vec![complex(0), complex(1)])
    }

    /// The coefficients of the polynomial, lowest degree first.
    pub fn coeffs(&self) -> &[Complex] {
        &self.0
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Returns true if every coefficient is real.
    pub fn is_real(&self) -> bool {
        self.0.iter().all(|c| c.imag().is_zero())
    }

    /// The largest magnitude of any coefficient.
    pub fn max_magnitude(&self) -> Float {
        self.0.iter()
            .map(|c| float(c.abs_ref()))
            .fold(float(0), |max, n| if n > max { n } else { max })
    }

    fn add(mut self, other: Poly) -> Poly {
        if other.0.len() > self.0.len() {
            self.0.resize(other.0.len(), complex(0));
        }
        for (lhs, rhs) in self.0.iter_mut().zip(other.0) {
            *lhs += rhs;
        }
        self
    }

    fn mul(&self, other: &Poly) -> Result<Poly, PolyError> {
        let degree = self.degree() + other.degree();
        if degree > MAX_DEGREE {
            return Err(PolyError::NotPolynomial(format!("the degree is higher than {}", MAX_DEGREE)));
        }

        let mut out = vec![complex(0); degree + 1];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in other.0.iter().enumerate() {
                out[i + j] += complex(a * b);
            }
        }
        Ok(Poly(out))
    }

    fn pow(&self, n: usize) -> Result<Poly, PolyError> {
        (0..n).try_fold(Poly::constant(complex(1)), |acc, _| acc.mul(self))
    }

    /// Drops the highest-degree coefficients while they are negligible compared to the largest
    /// coefficient. Rounding in the coefficients of a cancelled term, such as `x^2` in
    /// `x^2 + x - x^2`, would otherwise raise the degree.
    pub fn trimmed(mut self, tolerance: f64) -> Poly {
        let threshold = self.max_magnitude() * tolerance;
        while self.0.len() > 1 {
            match self.0.last() {
                Some(c) if float(c.abs_ref()) <= threshold => {
                    self.0.pop();
                },
                _ => break,
            }
        }
        self
    }
}

/// Extracts the coefficients of a polynomial in `var` from the expression.
struct Extractor<'a> {
    var: &'a str,
    ctxt: &'a Ctxt,
}

impl Extractor<'_> {
    /// Evaluates a part of the expression that does not contain the variable.
    fn constant(&self, expr: &SymExpr) -> Result<Poly, PolyError> {
        let value = expr.eval(self.ctxt)?;
        Ok(Poly::constant(value.into_complex()))
    }

    /// Returns the exponent of a power of the variable, if it is a small non-negative integer.
    fn exponent(&self, exp: &SymExpr) -> Result<usize, PolyError> {
        let unsupported = || PolyError::NotPolynomial(
            format!("`{}` is raised to a negative or fractional power", self.var),
        );
        let value = exp.eval(self.ctxt)?;
        let n = value.as_float()
            .filter(|n| n.is_integer() && !n.is_sign_negative())
            .ok_or_else(unsupported)?;
        match n.to_u32_saturating().map(|n| n as usize) {
            Some(n) if n <= MAX_DEGREE => Ok(n),
            _ => Err(PolyError::NotPolynomial(format!("the degree is higher than {}", MAX_DEGREE))),
        }
    }

    fn extract(&self, expr: &SymExpr, depth: usize) -> Result<Poly, PolyError> {
        if depth > self.ctxt.policy.max_depth {
            return Err(SymbolicError::DepthExceeded.into());
        }
        if !expr.contains_symbol(self.var) {
            return self.constant(expr);
        }

        match expr {
            SymExpr::Primary(Primary::Symbol(_)) => Ok(Poly::var()),
            SymExpr::Primary(Primary::Call(name, _)) => Err(PolyError::NotPolynomial(
                format!("`{}` appears inside `{}`", self.var, name),
            )),
            SymExpr::Primary(Primary::Number(_)) => self.constant(expr),
            SymExpr::Add(terms) => terms.iter()
                .try_fold(Poly::constant(complex(0)), |acc, term| {
                    Ok(acc.add(self.extract(term, depth + 1)?))
                }),
            SymExpr::Mul(factors) => factors.iter()
                .try_fold(Poly::constant(complex(1)), |acc, factor| {
                    acc.mul(&self.extract(factor, depth + 1)?)
                }),
            SymExpr::Exp(base, exp) => {
                if exp.contains_symbol(self.var) {
                    return Err(PolyError::NotPolynomial(
                        format!("`{}` appears in an exponent", self.var),
                    ));
                }
                let n = self.exponent(exp)?;
                self.extract(base, depth + 1)?.pow(n)
            },
        }
    }
}

/// Extracts the coefficients of the expression as a polynomial in `var`. Symbols other than
/// `var` are evaluated in the context.
pub fn extract(expr: &SymExpr, var: &str, ctxt: &Ctxt) -> Result<Poly, PolyError> {
    Extractor { var, ctxt }.extract(expr, 0)
}

#[cfg(test)]
mod tests {
    use mathbot_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use crate::numerical::value::Value;
    use crate::symbolic::expr::from_ast;
    use super::*;

    fn extract_from(source: &str, ctxt: &Ctxt) -> Result<Poly, PolyError> {
        let expr = from_ast(&parse(source).unwrap(), ctxt, Some("x")).unwrap();
        extract(&expr, "x", ctxt)
    }

    fn coeffs(source: &str) -> Vec<Complex> {
        extract_from(source, &Ctxt::default()).unwrap().trimmed(1e-9).0
    }

    #[test]
    fn quadratic() {
        assert_eq!(coeffs("x^2 - 5x + 6"), vec![complex(6), complex(-5), complex(1)]);
    }

    #[test]
    fn expanded_product() {
        // (x + 1)(x - 1) = x^2 - 1
        assert_eq!(coeffs("(x + 1)(x - 1)"), vec![complex(-1), complex(0), complex(1)]);
    }

    #[test]
    fn cancelled_term() {
        assert_eq!(coeffs("x^2 + x - x^2"), vec![complex(0), complex(1)]);
    }

    #[test]
    fn complex_coefficient() {
        assert_eq!(coeffs("i*x + 1"), vec![complex(1), complex((0, 1))]);
    }

    #[test]
    fn bound_symbols() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("a", Value::from(3));
        let poly = extract_from("a*x^2", &ctxt).unwrap();
        assert_eq!(poly.0, vec![complex(0), complex(0), complex(3)]);
    }

    #[test]
    fn unknown_symbol() {
        assert_eq!(
            extract_from("y*x", &Ctxt::default()),
            Err(PolyError::Symbolic(SymbolicError::UnknownSymbol("y".to_string()))),
        );
    }

    #[test]
    fn not_polynomial() {
        let ctxt = Ctxt::default();
        assert!(matches!(extract_from("sin(x)", &ctxt), Err(PolyError::NotPolynomial(_))));
        assert!(matches!(extract_from("2^x", &ctxt), Err(PolyError::NotPolynomial(_))));
        assert!(matches!(extract_from("1/x", &ctxt), Err(PolyError::NotPolynomial(_))));
        assert!(matches!(extract_from("x^0.5", &ctxt), Err(PolyError::NotPolynomial(_))));
        assert!(matches!(extract_from("x^100", &ctxt), Err(PolyError::NotPolynomial(_))));
    }
}
