//! Derivatives of the builtin functions with a single argument.
//!
//! Each function here returns the derivative of the builtin with respect to its argument `u`,
//! evaluated at `u`. The chain rule (multiplying by `u'`) is applied by the caller.

use crate::symbolic::expr::SymExpr;

/// `1 - u^2`
fn one_minus_square(u: &SymExpr) -> SymExpr {
    SymExpr::int(1) + -u.clone().pow(SymExpr::int(2))
}

/// `1 + u^2`
fn one_plus_square(u: &SymExpr) -> SymExpr {
    SymExpr::int(1) + u.clone().pow(SymExpr::int(2))
}

/// `sin'(u) = cos(u)`
pub fn sin(u: &SymExpr) -> SymExpr {
    SymExpr::call("cos", vec![u.clone()])
}

/// `cos'(u) = -sin(u)`
pub fn cos(u: &SymExpr) -> SymExpr {
    -SymExpr::call("sin", vec![u.clone()])
}

/// `tan'(u) = 1 / cos(u)^2`
pub fn tan(u: &SymExpr) -> SymExpr {
    SymExpr::call("cos", vec![u.clone()]).pow(SymExpr::int(-2))
}

/// `asin'(u) = 1 / sqrt(1 - u^2)`
pub fn asin(u: &SymExpr) -> SymExpr {
    SymExpr::call("sqrt", vec![one_minus_square(u)]).recip()
}

/// `acos'(u) = -1 / sqrt(1 - u^2)`
pub fn acos(u: &SymExpr) -> SymExpr {
    -asin(u)
}

/// `atan'(u) = 1 / (1 + u^2)`
pub fn atan(u: &SymExpr) -> SymExpr {
    one_plus_square(u).recip()
}

pub fn sinh(u: &SymExpr) -> SymExpr {
    SymExpr::call("cosh", vec![u.clone()])
}

pub fn cosh(u: &SymExpr) -> SymExpr {
    SymExpr::call("sinh", vec![u.clone()])
}

/// `tanh'(u) = 1 / cosh(u)^2`
pub fn tanh(u: &SymExpr) -> SymExpr {
    SymExpr::call("cosh", vec![u.clone()]).pow(SymExpr::int(-2))
}

pub fn exp(u: &SymExpr) -> SymExpr {
    SymExpr::call("exp", vec![u.clone()])
}

/// `ln'(u) = 1 / u`
pub fn ln(u: &SymExpr) -> SymExpr {
    u.clone().recip()
}

/// `log'(u) = 1 / (u ln(10))`
pub fn log(u: &SymExpr) -> SymExpr {
    u.clone().recip() * SymExpr::call("ln", vec![SymExpr::int(10)]).recip()
}

/// `log2'(u) = 1 / (u ln(2))`
pub fn log2(u: &SymExpr) -> SymExpr {
    u.clone().recip() * SymExpr::call("ln", vec![SymExpr::int(2)]).recip()
}

/// `sqrt'(u) = 1 / (2 sqrt(u))`
pub fn sqrt(u: &SymExpr) -> SymExpr {
    SymExpr::int(2).recip() * SymExpr::call("sqrt", vec![u.clone()]).recip()
}

/// `cbrt'(u) = 1 / (3 cbrt(u)^2)`
pub fn cbrt(u: &SymExpr) -> SymExpr {
    SymExpr::int(3).recip() * SymExpr::call("cbrt", vec![u.clone()]).pow(SymExpr::int(-2))
}

/// `abs'(u) = u / abs(u)`, undefined at `u = 0`
pub fn abs(u: &SymExpr) -> SymExpr {
    u.clone() * SymExpr::call("abs", vec![u.clone()]).recip()
}

/// `(u^n)' = n u^(n - 1)`, for a constant `n`
pub(super) fn power(base: &SymExpr, exp: &SymExpr) -> SymExpr {
    exp.clone() * base.clone().pow(exp.clone() + SymExpr::int(-1))
}
