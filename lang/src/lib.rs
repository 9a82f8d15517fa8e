use crate::{
    codegen::{js::JsCodeGenerator, CodeGenerator},
    lower::Lower,
    syntax::{
        desugar::{Desugar, DesugarLevel},
        parse::{LiParser, ParseError},
        tree::{Ident, Program},
    },
};
use std::fmt::Formatter;

extern crate pest;
#[macro_use]
extern crate pest_derive;
#[macro_use]
extern crate lazy_static;

pub mod codegen;
pub mod lower;
pub mod syntax;

mod tests;

#[derive(Debug)]
pub enum CompileError {
    Parse(ParseError),
    Pass(PassError),
}

/// The single failure surface of the rewrite and emission passes: a
/// construct the pass does not support, or a primitive applied to the
/// wrong number of operands.
#[derive(Debug, Clone, PartialEq)]
pub enum PassError {
    Unsupported(&'static str),
    PrimArity(Ident, usize),
}

impl std::fmt::Display for PassError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PassError::Unsupported(what) => {
                write!(f, "CompileError: unsupported construct '{}'", what)
            }
            PassError::PrimArity(op, argc) => write!(
                f,
                "CompileError: primitive '{}' applied to {} operand(s)",
                op, argc
            ),
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Pass(e) => write!(f, "{}", e),
        }
    }
}

pub struct Compiler;

impl Compiler {
    /// Parse, desugar and lower a source text into a core-language AST.
    pub fn compile(level: DesugarLevel, input: &str) -> Result<Program, CompileError> {
        let ast = LiParser::ast(input)?;
        Lower::run(Desugar::run(ast, level)).map_err(CompileError::Pass)
    }

    /// Full pipeline: core-language AST rendered as JavaScript source.
    pub fn compile_js(level: DesugarLevel, input: &str) -> Result<String, CompileError> {
        let core = Compiler::compile(level, input)?;
        JsCodeGenerator::new()
            .codegen(core)
            .map_err(CompileError::Pass)
    }
}
