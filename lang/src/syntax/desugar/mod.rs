use crate::syntax::{
    desugar::{let_apply::LetToApply, let_star::LetStarToLet},
    tree::Program,
};

pub mod let_apply;
pub mod let_star;

#[derive(Clone)]
pub enum DesugarLevel {
    /// Expand `let*` into nested single-binding `let`s.
    Sequential,
    /// Additionally rewrite every `let` into a lambda application.
    Full,
}

pub struct Desugar;

impl Desugar {
    pub fn run(input: Program, level: DesugarLevel) -> Program {
        match level {
            DesugarLevel::Sequential => input.let_star_to_let(),
            DesugarLevel::Full => input.let_star_to_let().let_to_apply(),
        }
    }
}
