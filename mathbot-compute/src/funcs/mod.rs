//! All builtin functions that can be used in an expression.
//!
//! The functions are kept in a single table, keyed by name, that is built the first time it is
//! used. Each entry holds the number of arguments the function takes, the rule to evaluate it
//! numerically, and (for some single-argument functions) the rule to differentiate it.
//!
//! # Example
//!
//! ```
//! use mathbot_compute::funcs;
//! use mathbot_compute::numerical::{policy::Policy, value::Value};
//!
//! let sqrt = funcs::get("sqrt").unwrap();
//! assert_eq!(sqrt.arity, 1);
//!
//! let result = (sqrt.eval)(&[Value::from(16)], &Policy::default()).unwrap();
//! assert_eq!(result, Value::from(4));
//! ```

pub mod miscellaneous;
pub mod power;
pub mod trigonometry;

use crate::{
    numerical::{ops::NumError, policy::Policy, value::Value},
    symbolic::{derivative::function as derive, expr::SymExpr},
};
use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Evaluates a builtin function with the given arguments. The number of arguments has already
/// been checked against the arity of the function.
pub type EvalFn = fn(&[Value], &Policy) -> Result<Value, NumError>;

/// Returns the derivative of a single-argument function with respect to its argument, evaluated
/// at the given argument. The caller applies the chain rule.
pub type DerivativeFn = fn(&SymExpr) -> SymExpr;

/// A builtin function.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    /// The name of the function.
    pub name: &'static str,

    /// The number of arguments the function takes.
    pub arity: usize,

    /// The rule used to evaluate the function.
    pub eval: EvalFn,

    /// The rule used to differentiate the function, if there is one.
    pub derivative: Option<DerivativeFn>,
}

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    use miscellaneous::*;
    use power::*;
    use trigonometry::*;

    macro_rules! build {
        ($($name:literal $arity:literal => $eval:expr $(, $derivative:expr)?);* $(;)?) => {
            [
                $(
                    Builtin {
                        name: $name,
                        arity: $arity,
                        eval: $eval,
                        derivative: build!(@derivative $($derivative)?),
                    },
                )*
            ]
                .into_iter()
                .map(|builtin| (builtin.name, builtin))
                .collect()
        };
        (@derivative) => { None };
        (@derivative $derivative:expr) => { Some($derivative) };
    }

    build! {
        "sin" 1 => sin, derive::sin;
        "cos" 1 => cos, derive::cos;
        "tan" 1 => tan, derive::tan;
        "asin" 1 => asin, derive::asin;
        "acos" 1 => acos, derive::acos;
        "atan" 1 => atan, derive::atan;
        "sinh" 1 => sinh, derive::sinh;
        "cosh" 1 => cosh, derive::cosh;
        "tanh" 1 => tanh, derive::tanh;
        "exp" 1 => exp, derive::exp;
        "ln" 1 => ln, derive::ln;
        "log" 1 => log, derive::log;
        "log2" 1 => log2, derive::log2;
        "sqrt" 1 => sqrt, derive::sqrt;
        "cbrt" 1 => cbrt, derive::cbrt;
        "abs" 1 => abs, derive::abs;
        "floor" 1 => floor;
        "ceil" 1 => ceil;
        "round" 1 => round;
        "factorial" 1 => factorial;
        "root" 2 => root;
        "min" 2 => min;
        "max" 2 => max;
        "mod" 2 => modulo;
    }
});

/// Returns the builtin function with the given name.
pub fn get(name: &str) -> Option<&'static Builtin> {
    BUILTINS.get(name)
}

/// Returns the names of all builtin functions, in alphabetical order.
pub fn names() -> Vec<&'static str> {
    let mut names = BUILTINS.keys().copied().collect::<Vec<_>>();
    names.sort_unstable();
    names
}

/// Returns the names of all builtin functions with a name similar to the given name, in
/// alphabetical order.
pub fn similar(name: &str) -> Vec<String> {
    names()
        .into_iter()
        .filter(|n| levenshtein(n, name) < 2)
        .map(str::to_string)
        .collect()
}

/// Extracts the single argument of a function.
pub(crate) fn one(args: &[Value]) -> Result<&Value, NumError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(NumError::Domain(format!("expected 1 argument, found {}", args.len()))),
    }
}

/// Extracts both arguments of a two-argument function.
pub(crate) fn two(args: &[Value]) -> Result<(&Value, &Value), NumError> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(NumError::Domain(format!("expected 2 arguments, found {}", args.len()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete() {
        assert_eq!(names().len(), 24);
        assert!(names().contains(&"mod"));
        assert_eq!(get("root").map(|f| f.arity), Some(2));
        assert!(get("floor").is_some_and(|f| f.derivative.is_none()));
        assert!(get("sin").is_some_and(|f| f.derivative.is_some()));
    }

    #[test]
    fn suggestions() {
        assert_eq!(similar("sqr"), vec!["sqrt".to_string()]);
        assert_eq!(similar("cos"), vec!["acos", "cos", "cosh"]);
        assert!(similar("frobnicate").is_empty());
    }
}
