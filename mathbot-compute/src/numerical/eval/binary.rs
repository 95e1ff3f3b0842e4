use mathbot_error::Error;
use mathbot_parser::parser::{ast::binary::Binary, token::op::BinOpKind};
use crate::numerical::{ctxt::Ctxt, eval::Eval, ops::{self, NumError}, value::Value};

impl Eval for Binary {
    fn eval_at(&self, ctxt: &Ctxt, depth: usize) -> Result<Value, Error> {
        let left = self.lhs.eval_at(ctxt, depth + 1)?;
        let right = self.rhs.eval_at(ctxt, depth + 1)?;
        ops::binary(self.op.kind, left, right, &ctxt.policy).map_err(|err| {
            // a zero divisor is highlighted on its own
            let span = match (&err, self.op.kind) {
                (NumError::DivisionByZero, BinOpKind::Div | BinOpKind::Mod) => self.rhs.span(),
                _ => self.span(),
            };
            err.into_error(vec![span])
        })
    }
}
