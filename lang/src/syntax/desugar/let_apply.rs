use crate::syntax::tree::{
    Binding, CExp,
    CExp::{AppExp, IfExp, LetExp, LetStarExp, ProcExp},
    Exp,
    Exp::{DefineExp, ExpItem},
};

/// Rewrite one `let` into an immediate lambda application. Binding
/// variables become the parameters, initializers become the operands,
/// orders preserved. The result is not normalized; recursing into it
/// is the caller's job.
pub fn rewrite_let(bindings: Vec<Binding>, body: Vec<CExp>) -> CExp {
    let (vars, vals): (Vec<_>, Vec<_>) = bindings.into_iter().map(|b| (b.var, b.val)).unzip();
    AppExp(Box::new(ProcExp(vars, body)), vals)
}

pub(crate) trait LetToApply {
    fn let_to_apply(self) -> Self;
}

impl<T: LetToApply> LetToApply for Box<T> {
    fn let_to_apply(self) -> Self {
        Box::new((*self).let_to_apply())
    }
}

impl<T: LetToApply> LetToApply for Vec<T> {
    fn let_to_apply(self) -> Self {
        self.into_iter().map(|t| t.let_to_apply()).collect()
    }
}

impl LetToApply for Binding {
    fn let_to_apply(self) -> Self {
        Binding {
            var: self.var,
            val: self.val.let_to_apply(),
        }
    }
}

impl LetToApply for Exp {
    fn let_to_apply(self) -> Self {
        match self {
            DefineExp(var, val) => DefineExp(var, val.let_to_apply()),
            ExpItem(cexp) => ExpItem(cexp.let_to_apply()),
        }
    }
}

impl LetToApply for CExp {
    fn let_to_apply(self) -> Self {
        match self {
            IfExp(test, then, alt) => IfExp(
                test.let_to_apply(),
                then.let_to_apply(),
                alt.let_to_apply(),
            ),
            AppExp(rator, rands) => AppExp(rator.let_to_apply(), rands.let_to_apply()),
            ProcExp(params, body) => ProcExp(params, body.let_to_apply()),
            LetExp(bindings, body) => rewrite_let(bindings, body).let_to_apply(),
            LetStarExp(bindings, body) => {
                LetStarExp(bindings.let_to_apply(), body.let_to_apply())
            }
            atom => atom,
        }
    }
}
