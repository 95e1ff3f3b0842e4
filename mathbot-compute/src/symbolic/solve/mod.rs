//! Solving linear and quadratic equations in a single variable.
//!
//! An equation `lhs = rhs` is first rearranged into `lhs - rhs = 0` with [`rearrange`], then
//! [`solve`] simplifies it and extracts its coefficients as a polynomial in the variable (see
//! [`poly`]). Linear equations are solved by isolating the variable, and quadratic equations with
//! the discriminant. Every candidate root is substituted back into the rearranged equation before
//! it is reported, so a root introduced by simplification (such as `x = 0` for `x^2 / x = 0`) is
//! discarded.

pub mod poly;
pub mod step;

use mathbot_error::Error;
use rug::{ops::Pow, Complex, Float};
use std::fmt::{self, Display, Formatter};
use crate::{
    numerical::{ctxt::Ctxt, policy::ComplexPolicy, value::Value},
    primitive::{complex, float},
};
use super::{
    error::{SymbolicError, UnsupportedEquation},
    expr::SymExpr,
    simplify::simplify,
    step_collector::StepCollector,
};
use poly::{Poly, PolyError};
use step::SolveStep;

/// The kind of roots found for an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// The single root of a linear equation.
    Linear,

    /// Two distinct real roots of a quadratic equation with a positive discriminant.
    DistinctReal,

    /// The single root of a quadratic equation with a zero discriminant.
    Repeated,

    /// Two complex conjugate roots of a quadratic equation with real coefficients and a negative
    /// discriminant.
    ComplexConjugate,

    /// The roots of a quadratic equation with complex coefficients.
    Complex,
}

/// The solution of an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// The equation has a finite number of roots.
    Roots {
        /// The degree of the polynomial that was solved.
        degree: usize,

        /// The kind of roots.
        kind: RootKind,

        /// The roots, in ascending order if they are all real.
        roots: Vec<Value>,
    },

    /// No value satisfies the equation.
    NoSolution,

    /// Every value satisfies the equation.
    Infinite,

    /// The equation is outside the class of equations that can be solved.
    Unsupported {
        /// Why the equation is unsupported.
        reason: String,
    },
}

impl Solution {
    /// Returns the roots of the equation. This is empty unless the solution is
    /// [`Solution::Roots`].
    pub fn roots(&self) -> &[Value] {
        match self {
            Self::Roots { roots, .. } => roots,
            _ => &[],
        }
    }

    /// Converts [`Solution::Unsupported`] into an [`Error`] spanning the whole source, and returns
    /// any other solution unchanged.
    pub fn require_supported(self, source: &str) -> Result<Self, Error> {
        match self {
            Self::Unsupported { reason } => Err(Error::new(
                vec![0..source.len()],
                UnsupportedEquation { reason },
            )),
            other => Ok(other),
        }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Roots { roots, .. } => {
                let mut iter = roots.iter();
                if let Some(root) = iter.next() {
                    write!(f, "{}", root)?;
                    for root in iter {
                        write!(f, ", {}", root)?;
                    }
                }
                Ok(())
            },
            Self::NoSolution => write!(f, "no solution"),
            Self::Infinite => write!(f, "every value is a solution"),
            Self::Unsupported { reason } => write!(f, "cannot solve this equation: {}", reason),
        }
    }
}

/// Rearranges the equation `lhs = rhs` into the expression `lhs - rhs`, which is zero at the
/// roots. An expression with no right-hand side is already in this form.
pub fn rearrange(lhs: SymExpr, rhs: Option<SymExpr>) -> SymExpr {
    match rhs {
        Some(rhs) => lhs + -rhs,
        None => lhs,
    }
}

/// Returns the magnitude of a complex number.
fn magnitude(c: &Complex) -> Float {
    float(c.abs_ref())
}

/// `bx + c = 0`
fn linear(b: &Complex, c: &Complex) -> Complex {
    -(complex(c) / b)
}

/// `ax^2 + bx + c = 0`
fn quadratic(
    a: &Complex,
    b: &Complex,
    c: &Complex,
    tolerance: f64,
    steps: &mut dyn StepCollector<SolveStep>,
) -> (RootKind, Vec<Complex>) {
    let b_squared = complex(b * b);
    let four_ac = complex(a * c) * 4;
    let scale = magnitude(&b_squared) + magnitude(&four_ac);
    let disc = b_squared - four_ac;
    steps.push(SolveStep::Discriminant(Value::from(disc.clone())));

    let two_a = complex(a) * 2;
    if magnitude(&disc) <= scale * tolerance {
        return (RootKind::Repeated, vec![-(complex(b) / &two_a)]);
    }

    let real_coeffs = [a, b, c].iter().all(|coeff| coeff.imag().is_zero());
    if !real_coeffs {
        let sqrt_disc = disc.sqrt();
        let minus_b = -complex(b);
        let roots = vec![
            (complex(&minus_b) + &sqrt_disc) / &two_a,
            (minus_b - sqrt_disc) / &two_a,
        ];
        return (RootKind::Complex, roots);
    }

    let (a, b, c) = (a.real().clone(), b.real().clone(), c.real().clone());
    let d = disc.real().clone();
    if d.is_sign_positive() {
        // q = -(b + sign(b) sqrt(d)) / 2 avoids cancelling `b` against `sqrt(d)`
        let sqrt_d = d.sqrt();
        let q = if b.is_sign_negative() {
            -(b - sqrt_d) / 2
        } else {
            -(b + sqrt_d) / 2
        };
        let mut roots = [float(&q / &a), c / q];
        roots.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        (RootKind::DistinctReal, roots.into_iter().map(complex).collect())
    } else {
        let two_a = float(2) * &a;
        let re = -b / &two_a;
        let im = (-d).sqrt() / two_a.abs();
        let roots = vec![
            complex((re.clone(), im.clone())),
            complex((re, -im)),
        ];
        (RootKind::ComplexConjugate, roots)
    }
}

/// Rounds away the imaginary part of a root if it is negligible compared to the real part, and
/// vice versa.
fn snap(root: Complex, tolerance: f64) -> Value {
    let (mut re, mut im) = root.into_real_imag();
    if im.clone().abs() <= re.clone().abs().max(&float(1)) * tolerance {
        im = float(0);
    } else if re.clone().abs() <= im.clone().abs() * tolerance {
        re = float(0);
    }
    Value::from(complex((re, im)))
}

/// Filters and verifies candidate roots.
struct Verifier<'a> {
    expr: &'a SymExpr,
    var: &'a str,
    ctxt: &'a Ctxt,
    poly: &'a Poly,
}

impl Verifier<'_> {
    /// Returns true if the roots are equal within the relative tolerance.
    fn same_root(&self, lhs: &Complex, rhs: &Complex) -> bool {
        let scale = magnitude(lhs).max(&magnitude(rhs)).max(&float(1));
        magnitude(&complex(lhs - rhs)) <= scale * self.ctxt.policy.tolerance
    }

    /// Returns true if substituting the root into the expression gives zero, within a tolerance
    /// that scales with the size of the terms of the polynomial at the root.
    fn satisfies(&self, root: &Value) -> bool {
        let mut ctxt = self.ctxt.clone();
        ctxt.add_var(self.var, root.clone());
        let Ok(residual) = self.expr.eval(&ctxt) else {
            return false;
        };

        let degree = i32::try_from(self.poly.degree()).unwrap_or(i32::MAX);
        let scale = self.poly.max_magnitude().max(&float(1))
            * root.magnitude().max(&float(1)).pow(degree);
        residual.magnitude() <= scale * self.ctxt.policy.tolerance
    }

    fn finish(
        &self,
        kind: RootKind,
        candidates: Vec<Complex>,
        steps: &mut dyn StepCollector<SolveStep>,
    ) -> Solution {
        let mut unique: Vec<Complex> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !unique.iter().any(|root| self.same_root(root, &candidate)) {
                unique.push(candidate);
            }
        }

        let kind = match kind {
            RootKind::DistinctReal | RootKind::Complex if unique.len() == 1 => RootKind::Repeated,
            kind => kind,
        };

        let tolerance = self.ctxt.policy.tolerance;
        let mut roots = Vec::with_capacity(unique.len());
        for root in unique {
            let root = snap(root, tolerance);
            let allowed = root.is_real() || self.ctxt.policy.complex == ComplexPolicy::Promote;
            if allowed && self.satisfies(&root) {
                roots.push(root);
            } else {
                steps.push(SolveStep::Discarded(root));
            }
        }

        if roots.is_empty() {
            Solution::NoSolution
        } else {
            Solution::Roots {
                degree: self.poly.degree(),
                kind,
                roots,
            }
        }
    }
}

/// Returns the divisors of the expression that contain the variable, without duplicates, in
/// left-to-right order. The expression is undefined wherever one of them is zero.
fn divisors<'a>(expr: &'a SymExpr, var: &str) -> Vec<&'a SymExpr> {
    let mut divisors: Vec<&SymExpr> = Vec::new();
    for sub_expr in expr.post_order_iter() {
        let SymExpr::Exp(base, exp) = sub_expr else {
            continue;
        };
        let negative = exp.as_number().is_some_and(|n| n.is_sign_negative() && !n.is_zero());
        if negative && base.contains_symbol(var) && !divisors.contains(&&**base) {
            divisors.push(&**base);
        }
    }
    divisors
}

/// Solves the equation `expr = 0` for the variable `var`. Symbols other than `var` are evaluated
/// in the context, and the context's policy bounds the work done.
pub fn solve(
    expr: &SymExpr,
    var: &str,
    ctxt: &Ctxt,
    steps: &mut dyn StepCollector<SolveStep>,
) -> Result<Solution, SymbolicError> {
    let policy = &ctxt.policy;
    steps.push(SolveStep::Rearranged(expr.to_string()));

    let simplified = simplify(expr, policy)?;
    steps.push(SolveStep::Simplified(simplified.to_string()));

    let poly = match poly::extract(&simplified, var, ctxt) {
        Ok(poly) => poly.trimmed(policy.tolerance),
        Err(PolyError::NotPolynomial(reason)) => return Ok(Solution::Unsupported { reason }),
        Err(PolyError::Symbolic(err)) => return Err(err),
    };
    steps.push(SolveStep::Degree(poly.degree()));

    let (kind, candidates) = match poly.coeffs() {
        [c] if magnitude(c) <= policy.tolerance => {
            for divisor in divisors(expr, var) {
                steps.push(SolveStep::Undefined(divisor.to_string()));
            }
            return Ok(Solution::Infinite);
        },
        [_] => return Ok(Solution::NoSolution),
        [c, b] => (RootKind::Linear, vec![linear(b, c)]),
        [c, b, a] => quadratic(a, b, c, policy.tolerance, steps),
        _ => return Ok(Solution::Unsupported {
            reason: format!("the equation has degree {}", poly.degree()),
        }),
    };

    let verifier = Verifier { expr, var, ctxt, poly: &poly };
    Ok(verifier.finish(kind, candidates, steps))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use mathbot_parser::parser::parse_equation;
    use pretty_assertions::assert_eq;
    use crate::numerical::policy::Policy;
    use crate::symbolic::expr::from_ast;
    use super::*;

    fn solve_with(source: &str, ctxt: &Ctxt, steps: &mut dyn StepCollector<SolveStep>) -> Solution {
        let equation = parse_equation(source).unwrap();
        let lhs = from_ast(&equation.lhs, ctxt, Some("x")).unwrap();
        let rhs = equation.rhs.as_ref().map(|rhs| from_ast(rhs, ctxt, Some("x")).unwrap());
        solve(&rearrange(lhs, rhs), "x", ctxt, steps).unwrap()
    }

    fn solve_x(source: &str) -> Solution {
        solve_with(source, &Ctxt::default(), &mut ())
    }

    fn real_roots(solution: &Solution) -> Vec<f64> {
        solution.roots()
            .iter()
            .map(|root| root.as_float().unwrap().to_f64())
            .collect()
    }

    #[test]
    fn linear_equation() {
        let solution = solve_x("2x + 1 = 7");
        assert!(matches!(solution, Solution::Roots { degree: 1, kind: RootKind::Linear, .. }));
        assert_eq!(solution.roots(), &[Value::from(3)]);
    }

    #[test]
    fn distinct_real_roots() {
        let solution = solve_x("x^2 - 5x + 6");
        assert!(matches!(solution, Solution::Roots { kind: RootKind::DistinctReal, .. }));
        let roots = real_roots(&solution);
        assert_float_absolute_eq!(roots[0], 2.0);
        assert_float_absolute_eq!(roots[1], 3.0);
    }

    #[test]
    fn repeated_root() {
        let solution = solve_x("x^2 - 2x + 1 = 0");
        assert!(matches!(solution, Solution::Roots { kind: RootKind::Repeated, .. }));
        assert_eq!(solution.roots(), &[Value::from(1)]);
    }

    #[test]
    fn complex_conjugate_roots() {
        let solution = solve_x("x^2 + 1");
        assert!(matches!(solution, Solution::Roots { kind: RootKind::ComplexConjugate, .. }));
        let roots = solution.roots().iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(roots, vec!["i", "-i"]);
    }

    #[test]
    fn complex_coefficients() {
        // (x - i)(x - 2) = x^2 - (2 + i)x + 2i
        let solution = solve_x("(x - i)(x - 2)");
        assert!(matches!(solution, Solution::Roots { kind: RootKind::Complex, .. }));
        let roots = solution.roots();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().any(|root| root.approx_eq(&Value::from(2), 1e-9)));
        assert!(roots.iter().any(|root| root.approx_eq(&Value::from(complex((0, 1))), 1e-9)));
    }

    #[test]
    fn reject_complex_roots() {
        let ctxt = Ctxt::new(Policy::real());
        assert_eq!(solve_with("x^2 + 1", &ctxt, &mut ()), Solution::NoSolution);

        let solution = solve_with("x^2 - 4", &ctxt, &mut ());
        assert_eq!(real_roots(&solution), vec![-2.0, 2.0]);
    }

    #[test]
    fn degree_zero() {
        assert_eq!(solve_x("x - x = 0"), Solution::Infinite);
        assert_eq!(solve_x("x + 1 = x"), Solution::NoSolution);
    }

    #[test]
    fn identity_with_divisor() {
        let mut steps = Vec::new();
        assert_eq!(solve_with("x/x = 1", &Ctxt::default(), &mut steps), Solution::Infinite);
        assert_eq!(steps.last(), Some(&SolveStep::Undefined("x".to_string())));

        let mut steps = Vec::new();
        assert_eq!(solve_with("x/x + 2/(x + 1) * (x + 1) = 3", &Ctxt::default(), &mut steps), Solution::Infinite);
        let undefined = steps.iter()
            .filter(|step| matches!(step, SolveStep::Undefined(_)))
            .collect::<Vec<_>>();
        assert_eq!(undefined, vec![
            &SolveStep::Undefined("x".to_string()),
            &SolveStep::Undefined("x + 1".to_string()),
        ]);

        let mut steps = Vec::new();
        solve_with("x - x = 0", &Ctxt::default(), &mut steps);
        assert!(!steps.iter().any(|step| matches!(step, SolveStep::Undefined(_))));
    }

    #[test]
    fn unsupported() {
        assert!(matches!(solve_x("x^3 = 8"), Solution::Unsupported { .. }));
        assert!(matches!(solve_x("sin(x) = 0"), Solution::Unsupported { .. }));
        assert!(matches!(solve_x("2^x = 8"), Solution::Unsupported { .. }));
    }

    #[test]
    fn cancelled_degree() {
        let solution = solve_x("x^2 + x = x^2 + 2");
        assert_eq!(solution.roots(), &[Value::from(2)]);
    }

    #[test]
    fn removed_singularity() {
        // simplifies to `x = 0`, but `0^2 / 0` is undefined
        assert_eq!(solve_x("x^2 / x = 0"), Solution::NoSolution);
    }

    #[test]
    fn bound_symbols() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("a", Value::from(2));
        let solution = solve_with("a*x = 6", &ctxt, &mut ());
        assert_eq!(solution.roots(), &[Value::from(3)]);
    }

    #[test]
    fn records_steps() {
        let mut steps = Vec::new();
        solve_with("x^2 = 5x - 6", &Ctxt::default(), &mut steps);
        assert_eq!(steps, vec![
            SolveStep::Rearranged("x^2 - (5x - 6)".to_string()),
            SolveStep::Simplified("x^2 - 5x + 6".to_string()),
            SolveStep::Degree(2),
            SolveStep::Discriminant(Value::from(1)),
        ]);
    }

    #[test]
    fn require_supported() {
        let err = solve_x("x^3").require_supported("x^3").unwrap_err();
        assert_eq!(err.class(), mathbot_error::ErrorClass::Unsupported);
        assert_eq!(err.span(), 0..3);
        assert!(solve_x("x").require_supported("x").is_ok());
    }
}
