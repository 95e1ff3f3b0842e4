use mathbot_error::Error;
use mathbot_parser::parser::ast::literal::{Literal, LitNum};
use crate::{
    numerical::{
        ctxt::Ctxt,
        error::{InvalidNumber, UndefinedVariable},
        eval::Eval,
        ops::checked,
        value::Value,
    },
    primitive::float_from_str,
};

impl Eval for LitNum {
    fn eval_at(&self, ctxt: &Ctxt, _: usize) -> Result<Value, Error> {
        let n = float_from_str(&self.value).ok_or_else(|| {
            Error::new(vec![self.span.clone()], InvalidNumber { value: self.value.clone() })
        })?;
        checked(Value::Float(n), &ctxt.policy)
            .map_err(|err| err.into_error(vec![self.span.clone()]))
    }
}

impl Eval for Literal {
    fn eval_at(&self, ctxt: &Ctxt, depth: usize) -> Result<Value, Error> {
        match self {
            Literal::Number(num) => num.eval_at(ctxt, depth),
            Literal::Symbol(sym) => ctxt.get_var(&sym.name).ok_or_else(|| {
                Error::new(vec![sym.span.clone()], UndefinedVariable {
                    name: sym.name.clone(),
                    suggestions: ctxt.get_similar_vars(&sym.name),
                })
            }),
        }
    }
}
