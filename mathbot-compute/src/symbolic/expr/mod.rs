//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](mathbot_parser::parser::ast::expr::Expr) type from `mathbot_parser` is a
//! recursive `enum` that represents the AST of a mathematical expression. It's convenient for
//! parsing, but not so much for algebraic manipulation.
//!
//! This module defines [`SymExpr`], which flattens the AST into lists of terms and factors. For
//! example, `x + (y + z)` is a single [`SymExpr::Add`] with three terms. Subtraction, division,
//! and negation are rewritten in terms of addition, multiplication, and powers:
//!
//! - `a - b` becomes `a + (-1)b`
//! - `a / b` becomes `a * b^-1`
//! - `-a` becomes `(-1)a`
//! - `n!` becomes `factorial(n)` and `a % b` becomes `mod(a, b)`
//!
//! # Strict equality
//!
//! Determining whether two expressions are mathematically equal is as hard as simplification
//! itself: `x^2 + 2x + 1` and `(x + 1)^2` are equal, but it takes expansion to tell. Instead,
//! [`SymExpr`] implements **strict equality**. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
//! [`SymExpr::Add`], etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//! terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality never reports false positives, so it can be used to decide whether two terms
//! can be combined without simplifying them first.

mod convert;
mod eval;
mod iter;

use crate::{numerical::fmt::fmt_float, primitive::float};
use iter::ExprIter;
use rug::Float;
use std::{fmt::{self, Display, Formatter}, ops::{Add, Mul, Neg}};

pub use convert::from_ast;

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A real number, such as `2` or `0.5`. This is never NaN or infinite.
    Number(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `max(x, y)`.
    Call(String, Vec<SymExpr>),
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", fmt_float(num)),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates a number.
    pub fn number(n: Float) -> Self {
        Self::Primary(Primary::Number(n))
    }

    /// Creates an integer.
    pub fn int(n: i32) -> Self {
        Self::number(float(n))
    }

    /// Creates a symbol.
    pub fn symbol(name: &str) -> Self {
        Self::Primary(Primary::Symbol(name.to_string()))
    }

    /// Creates a call to the function with the given name.
    pub fn call(name: &str, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.to_string(), args))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns `1 / self`. No simplification is done.
    pub fn recip(self) -> Self {
        self.pow(Self::int(-1))
    }

    /// If the expression is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a number.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if the expression is the given integer.
    pub fn is_int(&self, n: i32) -> bool {
        self.as_number().is_some_and(|num| *num == n)
    }

    /// If the expression is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the symbol with the given name appears anywhere in the expression,
    /// including in the arguments of function calls.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::int(0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::int(1),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// If the expression is visibly negative (a negative number, or a product with a negative
    /// numeric factor), returns the expression with its sign flipped.
    ///
    /// - `-3` -> `3`
    /// - `-2x` -> `2x`
    /// - `-x` (that is, `(-1)x`) -> `x`
    pub fn negated(&self) -> Option<SymExpr> {
        fn is_negative(n: &Float) -> bool {
            n.is_sign_negative() && !n.is_zero()
        }

        match self {
            Self::Primary(Primary::Number(n)) if is_negative(n) => Some(Self::number(-n.clone())),
            Self::Mul(factors) => {
                let idx = factors.iter().position(SymExpr::is_number)?;
                let n = factors[idx].as_number().filter(|n| is_negative(n))?;
                let mut factors = factors.clone();
                if *n == -1 {
                    factors.remove(idx);
                } else {
                    factors[idx] = Self::number(-n.clone());
                }
                Some(Self::Mul(factors).downgrade())
            },
            _ => None,
        }
    }
}

/// Returns true if both slices contain strictly equal expressions, in any order.
fn same_elements(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    for l in lhs {
        let matched = rhs.iter()
            .enumerate()
            .find(|(i, r)| !used[*i] && l == *r)
            .map(|(i, _)| i);
        match matched {
            Some(i) => used[i] = true,
            None => return false,
        }
    }
    true
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_elements(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two expressions, flattening [`SymExpr::Add`]s on either side into a single list of
/// terms.
impl Add for SymExpr {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        let mut terms = match self {
            Self::Add(terms) => terms,
            other => vec![other],
        };
        match rhs {
            Self::Add(rhs_terms) => terms.extend(rhs_terms),
            other => terms.push(other),
        }
        Self::Add(terms)
    }
}

/// Multiplies two expressions, flattening [`SymExpr::Mul`]s on either side into a single list of
/// factors.
impl Mul for SymExpr {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut factors = match self {
            Self::Mul(factors) => factors,
            other => vec![other],
        };
        match rhs {
            Self::Mul(rhs_factors) => factors.extend(rhs_factors),
            other => factors.push(other),
        }
        Self::Mul(factors)
    }
}

/// Negates an expression. Numbers are negated directly; anything else is multiplied by `-1`.
impl Neg for SymExpr {
    type Output = SymExpr;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::number(-n),
            other => Self::int(-1) * other,
        }
    }
}

/// Formats a factor of a product, or the base of a power, adding parentheses if needed.
fn fmt_operand(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Add(_) | SymExpr::Mul(_) => format!("({})", expr),
        SymExpr::Primary(Primary::Number(_)) if expr.negated().is_some() => format!("({})", expr),
        _ => expr.to_string(),
    }
}

/// Formats a product in the `2x*y/z` style: the numeric coefficient first, juxtaposed with the
/// next factor where that reads unambiguously, and factors with negative numeric exponents moved
/// to a denominator.
fn fmt_product(factors: &[SymExpr], f: &mut Formatter) -> fmt::Result {
    let mut coefficient = None;
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(n)) if coefficient.is_none() => coefficient = Some(n),
            SymExpr::Exp(base, exp) if exp.is_number() => match exp.negated() {
                Some(positive) if positive.is_int(1) => denominator.push((**base).clone()),
                Some(positive) => denominator.push((**base).clone().pow(positive)),
                None => numerator.push(factor),
            },
            _ => numerator.push(factor),
        }
    }

    let mut out = match coefficient {
        Some(n) if !numerator.is_empty() && *n == 1 => String::new(),
        Some(n) if !numerator.is_empty() && *n == -1 => String::from("-"),
        Some(n) => fmt_float(n),
        None if numerator.is_empty() => String::from("1"),
        None => String::new(),
    };
    for (i, factor) in numerator.iter().enumerate() {
        let factor = fmt_operand(factor);
        let juxtapose = i == 0 && (
            out.is_empty()
                || out == "-"
                || (factor.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '(')
                    && !factor.starts_with(['e', 'E']))
        );
        if !juxtapose {
            out.push('*');
        }
        out.push_str(&factor);
    }

    match denominator.len() {
        0 => write!(f, "{}", out),
        1 => write!(f, "{}/{}", out, fmt_operand(&denominator[0])),
        _ => write!(f, "{}/({})", out, SymExpr::Mul(denominator)),
    }
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        match term.negated() {
                            Some(positive @ Self::Add(_)) => write!(f, " - ({})", positive)?,
                            Some(positive) => write!(f, " - {}", positive)?,
                            None => write!(f, " + {}", term)?,
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => fmt_product(factors, f),
            Self::Exp(base, exp) => {
                if exp.is_number() {
                    if let Some(positive) = exp.negated() {
                        let denominator = if positive.is_int(1) {
                            (**base).clone()
                        } else {
                            (**base).clone().pow(positive)
                        };
                        return write!(f, "1/{}", fmt_operand(&denominator));
                    }
                }

                match &**base {
                    Self::Exp(..) => write!(f, "({})", base)?,
                    base => write!(f, "{}", fmt_operand(base))?,
                }
                write!(f, "^")?;
                write!(f, "{}", fmt_operand(exp))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn strict_equality_ignores_order() {
        let a = SymExpr::Add(vec![x(), SymExpr::int(1)]);
        let b = SymExpr::Add(vec![SymExpr::int(1), x()]);
        assert_eq!(a, b);

        let c = SymExpr::Mul(vec![x(), x(), SymExpr::symbol("y")]);
        let d = SymExpr::Mul(vec![x(), SymExpr::symbol("y"), SymExpr::symbol("y")]);
        assert_ne!(c, d);
    }

    #[test]
    fn flattening_ops() {
        let sum = (x() + SymExpr::int(1)) + (SymExpr::int(2) + x());
        assert!(matches!(&sum, SymExpr::Add(terms) if terms.len() == 4));

        let product = SymExpr::int(2) * (x() * x());
        assert!(matches!(&product, SymExpr::Mul(factors) if factors.len() == 3));
    }

    #[test]
    fn display_polynomial() {
        let expr = SymExpr::Add(vec![
            x().pow(SymExpr::int(2)),
            SymExpr::Mul(vec![SymExpr::int(-5), x()]),
            SymExpr::int(6),
        ]);
        assert_eq!(expr.to_string(), "x^2 - 5x + 6");

        let expr = SymExpr::Add(vec![SymExpr::Mul(vec![SymExpr::int(2), x()]), SymExpr::int(3)]);
        assert_eq!(expr.to_string(), "2x + 3");

        let expr = SymExpr::Add(vec![
            x(),
            SymExpr::Mul(vec![SymExpr::int(-1), SymExpr::Add(vec![x(), SymExpr::int(1)])]),
        ]);
        assert_eq!(expr.to_string(), "x - (x + 1)");
    }

    #[test]
    fn display_fractions() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), x().recip()]);
        assert_eq!(expr.to_string(), "2/x");

        let expr = x().pow(SymExpr::int(-2));
        assert_eq!(expr.to_string(), "1/x^2");

        let expr = SymExpr::Mul(vec![
            SymExpr::symbol("y"),
            SymExpr::Add(vec![x(), SymExpr::int(1)]).recip(),
        ]);
        assert_eq!(expr.to_string(), "y/(x + 1)");
    }

    #[test]
    fn display_products() {
        let expr = SymExpr::Mul(vec![SymExpr::int(-1), SymExpr::call("sin", vec![x()])]);
        assert_eq!(expr.to_string(), "-sin(x)");

        let expr = SymExpr::Mul(vec![x(), SymExpr::symbol("y")]);
        assert_eq!(expr.to_string(), "x*y");

        let expr = SymExpr::Mul(vec![SymExpr::int(3), SymExpr::Add(vec![x(), SymExpr::int(1)])]);
        assert_eq!(expr.to_string(), "3(x + 1)");

        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::symbol("e").pow(x())]);
        assert_eq!(expr.to_string(), "2*e^x");
    }

    #[test]
    fn display_powers() {
        let expr = SymExpr::Add(vec![x(), SymExpr::int(1)]).pow(SymExpr::int(2));
        assert_eq!(expr.to_string(), "(x + 1)^2");

        let expr = x().pow(SymExpr::Mul(vec![SymExpr::int(-1), x()]));
        assert_eq!(expr.to_string(), "x^(-x)");
    }

    #[test]
    fn contains() {
        let expr = SymExpr::Add(vec![SymExpr::call("sin", vec![x()]), SymExpr::int(1)]);
        assert!(expr.contains_symbol("x"));
        assert!(!expr.contains_symbol("sin"));
        assert!(!expr.contains_symbol("y"));
    }
}
