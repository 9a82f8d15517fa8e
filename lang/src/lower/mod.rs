use crate::{
    syntax::tree::{
        Binding, CExp,
        CExp::{
            AppExp, BoolExp, IfExp, LetExp, LetStarExp, LitExp, NumExp, PrimOp, ProcExp, StrExp,
            VarRef,
        },
        Exp,
        Exp::{DefineExp, ExpItem},
        Program,
    },
    PassError,
};

/// Narrows the surface dialect down to the core language. Every node is
/// rebuilt from its lowered children; the only surface-dialect construct,
/// `let*`, must already be gone (see `Desugar`), so meeting one here is
/// rejected rather than silently carried through.
pub struct Lower;

impl Lower {
    pub fn run(input: Program) -> Result<Program, PassError> {
        input.lower()
    }

    pub fn exp(input: Exp) -> Result<Exp, PassError> {
        input.lower()
    }
}

pub(crate) trait Lowerable
where
    Self: Sized,
{
    fn lower(self) -> Result<Self, PassError>;
}

impl<T: Lowerable> Lowerable for Box<T> {
    fn lower(self) -> Result<Self, PassError> {
        Ok(Box::new((*self).lower()?))
    }
}

impl<T: Lowerable> Lowerable for Vec<T> {
    fn lower(self) -> Result<Self, PassError> {
        self.into_iter().map(|t| t.lower()).collect()
    }
}

impl Lowerable for Binding {
    fn lower(self) -> Result<Self, PassError> {
        Ok(Binding {
            var: self.var,
            val: self.val.lower()?,
        })
    }
}

impl Lowerable for Exp {
    fn lower(self) -> Result<Self, PassError> {
        match self {
            DefineExp(var, val) => Ok(DefineExp(var, val.lower()?)),
            ExpItem(cexp) => Ok(ExpItem(cexp.lower()?)),
        }
    }
}

impl Lowerable for CExp {
    fn lower(self) -> Result<Self, PassError> {
        match self {
            NumExp(_) | BoolExp(_) | StrExp(_) | VarRef(_) | PrimOp(_) | LitExp(_) => Ok(self),
            IfExp(test, then, alt) => Ok(IfExp(test.lower()?, then.lower()?, alt.lower()?)),
            AppExp(rator, rands) => Ok(AppExp(rator.lower()?, rands.lower()?)),
            ProcExp(params, body) => Ok(ProcExp(params, body.lower()?)),
            LetExp(bindings, body) => Ok(LetExp(bindings.lower()?, body.lower()?)),
            LetStarExp(_, _) => Err(PassError::Unsupported("let*")),
        }
    }
}
