use mathbot_error::Error;
use mathbot_parser::parser::ast::call::Call;
use crate::{
    funcs,
    numerical::{
        ctxt::Ctxt,
        error::{UndefinedFunction, WrongArity},
        eval::Eval,
        ops::{self, checked},
        value::Value,
    },
};

impl Eval for Call {
    fn eval_at(&self, ctxt: &Ctxt, depth: usize) -> Result<Value, Error> {
        let name = &self.name.name;
        let Some(builtin) = funcs::get(name) else {
            // `x(x + 1)` multiplies the variable `x` by `x + 1`
            if let ([arg], Some(value)) = (self.args.as_slice(), ctxt.get_var(name)) {
                let arg = arg.eval_at(ctxt, depth + 1)?;
                return ops::mul(value, arg, &ctxt.policy)
                    .map_err(|err| err.into_error(vec![self.span()]));
            }

            return Err(Error::new(vec![self.name.span.clone()], UndefinedFunction {
                name: name.clone(),
                suggestions: funcs::similar(name),
            }));
        };

        if self.args.len() != builtin.arity {
            return Err(Error::new(self.outer_span().to_vec(), WrongArity {
                name: name.clone(),
                expected: builtin.arity,
                given: self.args.len(),
            }));
        }

        let args = self.args
            .iter()
            .map(|arg| arg.eval_at(ctxt, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        (builtin.eval)(&args, &ctxt.policy)
            .and_then(|value| checked(value, &ctxt.policy))
            .map_err(|err| err.into_error(vec![self.span()]))
    }
}
