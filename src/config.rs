use lang::syntax::desugar::DesugarLevel;

pub struct Config {
    pub desugar: DesugarLevel,
    pub dump_ast: bool,
}
