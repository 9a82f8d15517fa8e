use crate::syntax::tree::{
    Binding, CExp,
    CExp::{AppExp, IfExp, LetExp, LetStarExp, ProcExp},
    Exp,
    Exp::{DefineExp, ExpItem},
};

/// Rewrite one `let*` level. A single binding is an ordinary `let`;
/// with more bindings the first one becomes a `let` whose body is the
/// `let*` of the rest, which models sequential visibility: each
/// initializer sees the bindings before it.
pub fn rewrite_let_star(bindings: Vec<Binding>, body: Vec<CExp>) -> CExp {
    debug_assert!(!bindings.is_empty());
    let mut rest = bindings;
    let first = rest.remove(0);
    match rest.is_empty() {
        true => LetExp(vec![first], body),
        false => LetExp(vec![first], vec![LetStarExp(rest, body)]),
    }
}

pub(crate) trait LetStarToLet {
    fn let_star_to_let(self) -> Self;
}

impl<T: LetStarToLet> LetStarToLet for Box<T> {
    fn let_star_to_let(self) -> Self {
        Box::new((*self).let_star_to_let())
    }
}

impl<T: LetStarToLet> LetStarToLet for Vec<T> {
    fn let_star_to_let(self) -> Self {
        self.into_iter().map(|t| t.let_star_to_let()).collect()
    }
}

impl LetStarToLet for Binding {
    fn let_star_to_let(self) -> Self {
        Binding {
            var: self.var,
            val: self.val.let_star_to_let(),
        }
    }
}

impl LetStarToLet for Exp {
    fn let_star_to_let(self) -> Self {
        match self {
            DefineExp(var, val) => DefineExp(var, val.let_star_to_let()),
            ExpItem(cexp) => ExpItem(cexp.let_star_to_let()),
        }
    }
}

impl LetStarToLet for CExp {
    fn let_star_to_let(self) -> Self {
        match self {
            IfExp(test, then, alt) => IfExp(
                test.let_star_to_let(),
                then.let_star_to_let(),
                alt.let_star_to_let(),
            ),
            AppExp(rator, rands) => AppExp(rator.let_star_to_let(), rands.let_star_to_let()),
            ProcExp(params, body) => ProcExp(params, body.let_star_to_let()),
            LetExp(bindings, body) => {
                LetExp(bindings.let_star_to_let(), body.let_star_to_let())
            }
            LetStarExp(bindings, body) => rewrite_let_star(bindings, body).let_star_to_let(),
            atom => atom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tree::CExp::{NumExp, PrimOp, VarRef};
    use crate::syntax::tree::VarDecl;

    fn var(name: &str) -> VarDecl {
        VarDecl {
            name: name.to_owned(),
        }
    }

    fn bind(name: &str, val: CExp) -> Binding {
        Binding {
            var: var(name),
            val,
        }
    }

    #[test]
    fn a_single_binding_becomes_a_plain_let() {
        let rewritten = rewrite_let_star(
            vec![bind("x", NumExp(1.0))],
            vec![VarRef("x".to_owned())],
        );
        assert_eq!(
            rewritten,
            LetExp(
                vec![bind("x", NumExp(1.0))],
                vec![VarRef("x".to_owned())],
            )
        );
    }

    #[test]
    fn sequential_bindings_nest_one_per_let() {
        let x_plus_one = AppExp(
            Box::new(PrimOp("+".to_owned())),
            vec![VarRef("x".to_owned()), NumExp(1.0)],
        );
        let expanded = LetStarExp(
            vec![bind("x", NumExp(1.0)), bind("y", x_plus_one.clone())],
            vec![VarRef("y".to_owned())],
        )
        .let_star_to_let();

        // (let ((x 1)) (let ((y (+ x 1))) y)) -- y's initializer sits
        // inside x's scope.
        assert_eq!(
            expanded,
            LetExp(
                vec![bind("x", NumExp(1.0))],
                vec![LetExp(
                    vec![bind("y", x_plus_one)],
                    vec![VarRef("y".to_owned())],
                )],
            )
        );
    }

    #[test]
    fn expands_let_star_under_other_nodes() {
        let expanded = ProcExp(
            vec![var("n")],
            vec![LetStarExp(
                vec![bind("x", VarRef("n".to_owned()))],
                vec![VarRef("x".to_owned())],
            )],
        )
        .let_star_to_let();
        assert_eq!(
            expanded,
            ProcExp(
                vec![var("n")],
                vec![LetExp(
                    vec![bind("x", VarRef("n".to_owned()))],
                    vec![VarRef("x".to_owned())],
                )],
            )
        );
    }
}
