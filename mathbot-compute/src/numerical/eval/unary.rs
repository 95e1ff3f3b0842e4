use mathbot_error::Error;
use mathbot_parser::parser::{ast::unary::Unary, token::op::UnaryOpKind};
use crate::numerical::{ctxt::Ctxt, eval::Eval, ops, value::Value};

impl Eval for Unary {
    fn eval_at(&self, ctxt: &Ctxt, depth: usize) -> Result<Value, Error> {
        let operand = self.operand.eval_at(ctxt, depth + 1)?;
        match self.op.kind {
            UnaryOpKind::Neg => Ok(ops::neg(operand)),
            UnaryOpKind::Factorial => ops::factorial(operand, &ctxt.policy)
                .map_err(|err| err.into_error(vec![self.span()])),
        }
    }
}
