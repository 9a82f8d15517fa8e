use crate::{
    syntax::tree::{CExp, Exp, Program},
    PassError,
};

pub mod js;

pub trait CodeGenerator<Output> {
    fn codegen(&self, input: Program) -> Result<Output, PassError>;
}

pub trait PartialCodeGenerator<Output> {
    fn partial_codegen_exp(&self, _: Exp) -> Result<Output, PassError>;

    fn partial_codegen_cexp(&self, _: CExp) -> Result<Output, PassError>;
}

impl<T> CodeGenerator<String> for T
where
    T: PartialCodeGenerator<String>,
{
    fn codegen(&self, input: Program) -> Result<String, PassError> {
        let exps = input
            .into_iter()
            .map(|exp| self.partial_codegen_exp(exp))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exps.join(";\n"))
    }
}
