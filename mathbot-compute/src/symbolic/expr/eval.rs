use crate::{
    funcs,
    numerical::{ctxt::Ctxt, ops, value::Value},
    symbolic::error::SymbolicError,
};
use super::{Primary, SymExpr};

impl SymExpr {
    /// Numerically evaluates the expression, looking up symbols in the given context.
    pub fn eval(&self, ctxt: &Ctxt) -> Result<Value, SymbolicError> {
        self.eval_at(ctxt, 0)
    }

    fn eval_at(&self, ctxt: &Ctxt, depth: usize) -> Result<Value, SymbolicError> {
        if depth > ctxt.policy.max_depth {
            return Err(SymbolicError::DepthExceeded);
        }

        let policy = &ctxt.policy;
        match self {
            Self::Primary(Primary::Number(n)) => Ok(ops::checked(Value::Float(n.clone()), policy)?),
            Self::Primary(Primary::Symbol(name)) => ctxt.get_var(name)
                .ok_or_else(|| SymbolicError::UnknownSymbol(name.clone())),
            Self::Primary(Primary::Call(name, args)) => {
                let builtin = funcs::get(name)
                    .ok_or_else(|| SymbolicError::UnknownFunction(name.clone()))?;
                if builtin.arity != args.len() {
                    return Err(SymbolicError::WrongArity {
                        name: name.clone(),
                        expected: builtin.arity,
                        given: args.len(),
                    });
                }

                let args = args.iter()
                    .map(|arg| arg.eval_at(ctxt, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                let value = (builtin.eval)(&args, policy)?;
                Ok(ops::checked(value, policy)?)
            },
            Self::Add(terms) => terms.iter().try_fold(Value::from(0), |acc, term| {
                Ok(ops::add(acc, term.eval_at(ctxt, depth + 1)?, policy)?)
            }),
            Self::Mul(factors) => factors.iter().try_fold(Value::from(1), |acc, factor| {
                Ok(ops::mul(acc, factor.eval_at(ctxt, depth + 1)?, policy)?)
            }),
            Self::Exp(base, exp) => {
                let base = base.eval_at(ctxt, depth + 1)?;
                let exp = exp.eval_at(ctxt, depth + 1)?;
                Ok(ops::pow(base, exp, policy)?)
            },
        }
    }
}
