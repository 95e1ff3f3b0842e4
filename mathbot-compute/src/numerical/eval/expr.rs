use mathbot_error::Error;
use mathbot_parser::parser::ast::expr::Expr;
use crate::numerical::{ctxt::Ctxt, error::DepthExceeded, eval::Eval, value::Value};

impl Eval for Expr {
    fn eval_at(&self, ctxt: &Ctxt, depth: usize) -> Result<Value, Error> {
        if depth > ctxt.policy.max_depth {
            return Err(Error::new(vec![self.span()], DepthExceeded { max: ctxt.policy.max_depth }));
        }

        match self {
            Expr::Literal(literal) => literal.eval_at(ctxt, depth),
            Expr::Paren(paren) => paren.expr.eval_at(ctxt, depth + 1),
            Expr::Call(call) => call.eval_at(ctxt, depth),
            Expr::Unary(unary) => unary.eval_at(ctxt, depth),
            Expr::Binary(binary) => binary.eval_at(ctxt, depth),
        }
    }
}
