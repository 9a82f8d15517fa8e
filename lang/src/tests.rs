#[cfg(test)]
mod tests {
    use crate::lower::Lower;
    use crate::syntax::desugar::{Desugar, DesugarLevel};
    use crate::syntax::parse::LiParser;
    use crate::syntax::tree::{
        CExp::{AppExp, LetExp, NumExp, ProcExp, VarRef},
        Exp::ExpItem,
    };
    use crate::{Compiler, PassError};

    #[test]
    fn sequential_lets_compile_to_js() {
        let js = Compiler::compile_js(
            DesugarLevel::Sequential,
            "(let* ((x 1) (y (+ x 1))) y)",
        )
        .unwrap();
        assert_eq!(js, "((x) => ((y) => y)((x + 1)))(1)");
    }

    #[test]
    fn full_desugaring_leaves_no_let_forms() {
        let ast = LiParser::ast("(define f (lambda (n) (let ((x n)) x))) (f 2)").unwrap();
        let core = Lower::run(Desugar::run(ast, DesugarLevel::Full)).unwrap();
        match &core[0] {
            crate::syntax::tree::Exp::DefineExp(_, val) => match val {
                ProcExp(_, body) => assert_eq!(
                    body,
                    &vec![AppExp(
                        Box::new(ProcExp(
                            vec![crate::syntax::tree::VarDecl {
                                name: "x".to_owned()
                            }],
                            vec![VarRef("x".to_owned())],
                        )),
                        vec![VarRef("n".to_owned())],
                    )]
                ),
                other => panic!("expected a lambda, got {:?}", other),
            },
            other => panic!("expected a define, got {:?}", other),
        }
    }

    #[test]
    fn sequential_desugaring_keeps_plain_lets() {
        let ast = LiParser::ast("(let ((x 1)) x)").unwrap();
        let core = Lower::run(Desugar::run(ast, DesugarLevel::Sequential)).unwrap();
        assert_eq!(
            core,
            vec![ExpItem(LetExp(
                vec![crate::syntax::tree::Binding {
                    var: crate::syntax::tree::VarDecl {
                        name: "x".to_owned()
                    },
                    val: NumExp(1.0),
                }],
                vec![VarRef("x".to_owned())],
            ))]
        );
    }

    #[test]
    fn a_program_emits_in_order() {
        let js = Compiler::compile_js(
            DesugarLevel::Sequential,
            "(define one 1) (define two (+ one one)) two",
        )
        .unwrap();
        assert_eq!(js, "const one = 1;\nconst two = (one + one);\ntwo");
    }

    #[test]
    fn one_bad_node_fails_the_whole_pipeline() {
        // The lambda body carries two expressions; emission rejects it
        // and no partial text is produced.
        let result = Compiler::compile_js(
            DesugarLevel::Sequential,
            "(define ok 1) (lambda (x) 1 2) (define also-ok 2)",
        );
        match result {
            Err(crate::CompileError::Pass(e)) => {
                assert_eq!(e, PassError::Unsupported("multi-expression lambda body"))
            }
            other => panic!("expected a pass failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn lowering_a_single_exp_works_like_a_program() {
        let ast = LiParser::ast("(if #t 1 2)").unwrap();
        let exp = ast.into_iter().next().unwrap();
        assert_eq!(Lower::exp(exp.clone()), Ok(exp));
    }
}
