use mathbot_parser::parser::{
    ast::{expr::Expr as AstExpr, literal::Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::{funcs, numerical::ctxt::Ctxt, primitive::float_from_str, symbolic::error::SymbolicError};
use super::SymExpr;

/// Converts AST expressions into [`SymExpr`]s.
struct Converter<'a> {
    /// The context used to tell implicit multiplication (`x(x + 1)`) apart from calls to unknown
    /// functions.
    ctxt: &'a Ctxt,

    /// The variable the expression is being manipulated in terms of, if any.
    var: Option<&'a str>,
}

impl Converter<'_> {
    /// Returns true if the name refers to a value, rather than a function.
    fn is_value(&self, name: &str) -> bool {
        self.var == Some(name) || self.ctxt.has_var(name)
    }

    fn convert(&self, expr: &AstExpr, depth: usize) -> Result<SymExpr, SymbolicError> {
        if depth > self.ctxt.policy.max_depth {
            return Err(SymbolicError::DepthExceeded);
        }

        Ok(match expr {
            AstExpr::Literal(Literal::Number(num)) => {
                let n = float_from_str(&num.value).ok_or_else(|| SymbolicError::InvalidNumber {
                    value: num.value.clone(),
                    span: num.span.clone(),
                })?;
                SymExpr::number(n)
            },
            AstExpr::Literal(Literal::Symbol(sym)) => SymExpr::symbol(&sym.name),
            AstExpr::Paren(paren) => self.convert(&paren.expr, depth + 1)?,
            AstExpr::Call(call) => {
                let name = &call.name.name;
                let args = call.args
                    .iter()
                    .map(|arg| self.convert(arg, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;

                match funcs::get(name) {
                    Some(builtin) if builtin.arity != args.len() => {
                        return Err(SymbolicError::WrongArity {
                            name: name.clone(),
                            expected: builtin.arity,
                            given: args.len(),
                        });
                    },
                    Some(_) => SymExpr::call(name, args),
                    // unknown functions are kept; routines that need to evaluate or differentiate
                    // them report the error
                    None => match (self.is_value(name), <[SymExpr; 1]>::try_from(args)) {
                        (true, Ok([arg])) => SymExpr::symbol(name) * arg,
                        (false, Ok([arg])) => SymExpr::call(name, vec![arg]),
                        (_, Err(args)) => SymExpr::call(name, args),
                    },
                }
            },
            AstExpr::Unary(unary) => {
                let operand = self.convert(&unary.operand, depth + 1)?;
                match unary.op.kind {
                    UnaryOpKind::Neg => -operand,
                    UnaryOpKind::Factorial => SymExpr::call("factorial", vec![operand]),
                }
            },
            AstExpr::Binary(bin) => {
                let lhs = self.convert(&bin.lhs, depth + 1)?;
                let rhs = self.convert(&bin.rhs, depth + 1)?;
                match bin.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs + -rhs,
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs * rhs.recip(),
                    BinOpKind::Mod => SymExpr::call("mod", vec![lhs, rhs]),
                    BinOpKind::Exp => lhs.pow(rhs),
                }
            },
        })
    }
}

/// Converts an AST expression into a [`SymExpr`].
///
/// `var` names the variable the caller is working with (the variable to solve for, or to
/// differentiate with respect to). A call to a name that is not a builtin function, such as
/// `x(x + 1)`, is multiplication if the name is `var` or is bound in the context.
pub fn from_ast(expr: &AstExpr, ctxt: &Ctxt, var: Option<&str>) -> Result<SymExpr, SymbolicError> {
    Converter { ctxt, var }.convert(expr, 0)
}

#[cfg(test)]
mod tests {
    use mathbot_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn convert(source: &str) -> SymExpr {
        from_ast(&parse(source).unwrap(), &Ctxt::default(), Some("x")).unwrap()
    }

    #[test]
    fn flatten_sum() {
        assert_eq!(convert("x + (y + z)"), SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::symbol("y"),
            SymExpr::symbol("z"),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        assert_eq!(convert("x - y"), SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![SymExpr::int(-1), SymExpr::symbol("y")]),
        ]));
        assert_eq!(convert("x / y"), SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::symbol("y").recip(),
        ]));
        assert_eq!(convert("-2"), SymExpr::int(-2));
    }

    #[test]
    fn factorial_and_modulo() {
        assert_eq!(convert("x!"), SymExpr::call("factorial", vec![SymExpr::symbol("x")]));
        assert_eq!(convert("x % 2"), SymExpr::call("mod", vec![SymExpr::symbol("x"), SymExpr::int(2)]));
    }

    #[test]
    fn implicit_call() {
        assert_eq!(convert("x(x + 1)"), SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::int(1)]),
        ]));
        assert_eq!(convert("f(x)"), SymExpr::call("f", vec![SymExpr::symbol("x")]));
    }

    #[test]
    fn arity() {
        let err = from_ast(&parse("sin(x, 2)").unwrap(), &Ctxt::default(), None).unwrap_err();
        assert_eq!(err, SymbolicError::WrongArity { name: "sin".to_string(), expected: 1, given: 2 });
    }
}
