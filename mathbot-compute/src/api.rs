//! The entry points used to compute, simplify, differentiate, and solve expressions given as text.
//!
//! Each function parses its input, builds a fresh [`Ctxt`] from the given bindings and
//! [`Policy`], and returns either a result or a single [`Error`] located in the input. Nothing is
//! shared between calls.

use mathbot_error::Error;
use mathbot_parser::parser::{ast::expr::Expr as AstExpr, parse, parse_equation};
use crate::{
    numerical::{ctxt::{Bindings, Ctxt}, eval::Eval, policy::Policy, value::Value},
    symbolic::{
        self,
        error::{InvalidVariable, SymbolicError},
        expr::from_ast,
        simplify::step::Step,
        solve::{rearrange, step::SolveStep, Solution},
        step_collector::StepCollector,
    },
};

/// Evaluates the expression with the given variable bindings and the default [`Policy`].
pub fn compute(expression: &str, bindings: &Bindings) -> Result<Value, Error> {
    compute_with(expression, bindings, &Policy::default())
}

/// Evaluates the expression with the given variable bindings and [`Policy`].
pub fn compute_with(expression: &str, bindings: &Bindings, policy: &Policy) -> Result<Value, Error> {
    let ast = parse(expression)?;
    let ctxt = Ctxt::with_bindings(bindings, policy.clone());
    ast.eval(&ctxt)
}

/// Checks that the name can be used as a variable.
fn check_variable(name: &str) -> Result<(), Error> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::new(vec![0..0], InvalidVariable { name: name.to_string() }))
    }
}

/// Solves the equation (or the expression, taken to be equal to zero) for the given variable,
/// using the default [`Policy`].
///
/// Equations outside the supported class are returned as [`Solution::Unsupported`]; use
/// [`Solution::require_supported`] to turn that into an error.
pub fn solve_equation(expression: &str, variable: &str) -> Result<Solution, Error> {
    solve_equation_with(expression, variable, &Bindings::new(), &Policy::default(), &mut ())
}

/// Solves the equation for the given variable. Other symbols in the equation must be bound or be
/// constants. A binding for the variable itself is ignored.
pub fn solve_equation_with(
    expression: &str,
    variable: &str,
    bindings: &Bindings,
    policy: &Policy,
    steps: &mut impl StepCollector<SolveStep>,
) -> Result<Solution, Error> {
    let equation = parse_equation(expression)?;
    check_variable(variable)?;

    let mut ctxt = Ctxt::with_bindings(bindings, policy.clone());
    ctxt.remove_var(variable);

    let mut sources: Vec<&AstExpr> = vec![&equation.lhs];
    sources.extend(equation.rhs.as_ref());
    let locate = |err: SymbolicError| err.into_error(&sources, &ctxt);

    let lhs = from_ast(&equation.lhs, &ctxt, Some(variable)).map_err(locate)?;
    let rhs = equation.rhs.as_ref()
        .map(|rhs| from_ast(rhs, &ctxt, Some(variable)))
        .transpose()
        .map_err(locate)?;
    symbolic::solve(&rearrange(lhs, rhs), variable, &ctxt, steps).map_err(locate)
}

/// Differentiates the expression with respect to the given variable, using the default
/// [`Policy`], and returns the simplified derivative as text.
pub fn derivative(expression: &str, variable: &str) -> Result<String, Error> {
    derivative_with(expression, variable, &Policy::default())
}

/// Differentiates the expression with respect to the given variable, and returns the simplified
/// derivative as text. Other symbols are treated as constants.
pub fn derivative_with(expression: &str, variable: &str, policy: &Policy) -> Result<String, Error> {
    let ast = parse(expression)?;
    check_variable(variable)?;

    let ctxt = Ctxt::new(policy.clone());
    let locate = |err: SymbolicError| err.into_error(&[&ast], &ctxt);

    let expr = from_ast(&ast, &ctxt, Some(variable)).map_err(locate)?;
    symbolic::derivative(&expr, variable, policy)
        .map(|derivative| derivative.to_string())
        .map_err(locate)
}

/// Simplifies the expression and returns the result as text.
pub fn simplify(expression: &str) -> Result<String, Error> {
    simplify_with_steps(expression).map(|(simplified, _)| simplified)
}

/// Simplifies the expression, and returns the result as text along with the steps taken.
pub fn simplify_with_steps(expression: &str) -> Result<(String, Vec<Step>), Error> {
    let ast = parse(expression)?;
    let ctxt = Ctxt::default();
    let locate = |err: SymbolicError| err.into_error(&[&ast], &ctxt);

    let expr = from_ast(&ast, &ctxt, None).map_err(locate)?;
    let (simplified, steps) = symbolic::simplify::simplify_with_steps(&expr, &ctxt.policy)
        .map_err(locate)?;
    Ok((simplified.to_string(), steps))
}

#[cfg(test)]
mod tests {
    use mathbot_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use crate::{numerical::policy::ComplexPolicy, primitive::complex, symbolic::solve::RootKind};
    use super::*;

    fn bind(vars: &[(&str, i32)]) -> Bindings {
        vars.iter()
            .map(|(name, value)| (name.to_string(), Value::from(*value)))
            .collect()
    }

    fn compute_str(expression: &str) -> String {
        compute(expression, &Bindings::new()).unwrap().to_string()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(compute_str("2+3*4"), "14");
        assert_eq!(compute_str("(2+3)*4"), "20");
        assert_eq!(compute_str("2^10"), "1024");
    }

    #[test]
    fn bindings() {
        assert_eq!(compute("2x", &bind(&[("x", 5)])).unwrap(), Value::from(10));
        assert_eq!(compute("2-3x", &bind(&[("x", 1)])).unwrap(), Value::from(-1));
    }

    #[test]
    fn deterministic() {
        let first = compute("sin(1) + 2^0.5 / 3", &Bindings::new()).unwrap();
        let second = compute("sin(1) + 2^0.5 / 3", &Bindings::new()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn division_by_zero() {
        let err = compute("1/0", &Bindings::new()).unwrap_err();
        assert_eq!(err.class(), ErrorClass::DivisionByZero);
        assert_eq!(err.span(), 2..3);
    }

    #[test]
    fn unknown_identifier() {
        let err = compute("y+1", &Bindings::new()).unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnknownIdentifier);
        assert_eq!(err.span(), 0..1);
        assert!(err.message().contains('y'));
    }

    #[test]
    fn syntax_error() {
        let err = compute("2+", &Bindings::new()).unwrap_err();
        assert_eq!(err.class(), ErrorClass::SyntaxError);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn complex_policy() {
        assert_eq!(compute_str("sqrt(-4)"), "2i");

        let policy = Policy { complex: ComplexPolicy::Reject, ..Default::default() };
        let err = compute_with("sqrt(-4)", &Bindings::new(), &policy).unwrap_err();
        assert_eq!(err.class(), ErrorClass::DomainError);
    }

    #[test]
    fn solve_quadratic() {
        let solution = solve_equation("x^2-5x+6", "x").unwrap();
        assert_eq!(solution.roots(), &[Value::from(2), Value::from(3)]);

        let solution = solve_equation("x^2+1", "x").unwrap();
        assert!(matches!(solution, Solution::Roots { kind: RootKind::ComplexConjugate, .. }));
        assert_eq!(solution.roots(), &[Value::from(complex((0, 1))), Value::from(complex((0, -1)))]);
    }

    #[test]
    fn solve_equation_with_sides() {
        let solution = solve_equation("3x + 2 = x - 4", "x").unwrap();
        assert_eq!(solution.roots(), &[Value::from(-3)]);
    }

    #[test]
    fn solve_with_bindings_and_steps() {
        let mut steps = Vec::new();
        let solution = solve_equation_with(
            "a*t^2 = 8",
            "t",
            &bind(&[("a", 2), ("t", 100)]),
            &Policy::default(),
            &mut steps,
        ).unwrap();
        assert_eq!(solution.roots(), &[Value::from(-2), Value::from(2)]);
        assert!(steps.contains(&SolveStep::Degree(2)));
    }

    #[test]
    fn solve_errors() {
        let err = solve_equation("x + y = 1", "x").unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnknownIdentifier);
        assert_eq!(err.span(), 4..5);

        let err = solve_equation("x = ", "x").unwrap_err();
        assert_eq!(err.class(), ErrorClass::SyntaxError);

        let err = solve_equation("x = 1", "2x").unwrap_err();
        assert_eq!(err.class(), ErrorClass::SyntaxError);
    }

    #[test]
    fn solve_unsupported() {
        let solution = solve_equation("x^3 = 1", "x").unwrap();
        assert!(matches!(solution, Solution::Unsupported { .. }));

        let err = solution.require_supported("x^3 = 1").unwrap_err();
        assert_eq!(err.class(), ErrorClass::Unsupported);
    }

    #[test]
    fn differentiate() {
        assert_eq!(derivative("x^2+3x", "x").unwrap(), "2x + 3");
        assert_eq!(derivative("t^3", "t").unwrap(), "3t^2");
    }

    #[test]
    fn no_derivative() {
        let err = derivative("f(x) + 1", "x").unwrap_err();
        assert_eq!(err.class(), ErrorClass::DomainError);
        assert_eq!(err.span(), 0..1);
    }

    #[test]
    fn simplify_text() {
        assert_eq!(simplify("2x + 3x - 4 + 1").unwrap(), "5x - 3");

        let (simplified, steps) = simplify_with_steps("x * x").unwrap();
        assert_eq!(simplified, "x^2");
        assert!(steps.contains(&Step::CombineLikeFactors));
    }

    #[test]
    fn simplify_idempotent() {
        for source in ["x^2 - 5x + 6 - x", "3(y + 1)/y", "sqrt(x)*sqrt(x)", "1/2 + x/3"] {
            let once = simplify(source).unwrap();
            let twice = simplify(&once).unwrap();
            assert_eq!(once, twice);
        }
    }
}
