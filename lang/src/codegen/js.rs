use std::collections::HashMap;

use crate::{
    codegen::PartialCodeGenerator,
    syntax::{
        desugar::let_apply::rewrite_let,
        tree::{
            CExp,
            CExp::{
                AppExp, BoolExp, IfExp, LetExp, LetStarExp, LitExp, NumExp, PrimOp, ProcExp,
                StrExp, VarRef,
            },
            Exp,
            Exp::{DefineExp, ExpItem},
            Ident, VarDecl,
        },
    },
    PassError,
};

pub struct JsCodeGenerator;

impl JsCodeGenerator {
    pub fn new() -> JsCodeGenerator {
        JsCodeGenerator {}
    }
}

impl PartialCodeGenerator<String> for JsCodeGenerator {
    fn partial_codegen_exp(&self, exp: Exp) -> Result<String, PassError> {
        exp.codegen_to_js()
    }

    fn partial_codegen_cexp(&self, cexp: CExp) -> Result<String, PassError> {
        cexp.codegen_to_js()
    }
}

trait TargetJs {
    fn codegen_to_js(self) -> Result<String, PassError>;
}

impl<T: TargetJs> TargetJs for Box<T> {
    fn codegen_to_js(self) -> Result<String, PassError> {
        (*self).codegen_to_js()
    }
}

impl TargetJs for Exp {
    fn codegen_to_js(self) -> Result<String, PassError> {
        match self {
            DefineExp(var, val) => Ok(format!("const {} = {}", var.name, val.codegen_to_js()?)),
            ExpItem(cexp) => cexp.codegen_to_js(),
        }
    }
}

impl TargetJs for CExp {
    fn codegen_to_js(self) -> Result<String, PassError> {
        match self {
            NumExp(v) => Ok(v.to_string()),
            BoolExp(v) => Ok(v.to_string()),
            StrExp(v) => Ok(format!("\"{}\"", v)),
            LitExp(datum) => Ok(format!("Symbol.for(\"{}\")", datum)),
            VarRef(name) => Ok(name),
            PrimOp(op) => Ok(prim_value(op.as_str())),
            IfExp(test, then, alt) => Ok(format!(
                "({} ? {} : {})",
                test.codegen_to_js()?,
                then.codegen_to_js()?,
                alt.codegen_to_js()?
            )),
            ProcExp(params, body) => codegen_lambda(params, body),
            AppExp(rator, rands) => match *rator {
                PrimOp(op) => codegen_prim_apply(op, rands),
                rator => Ok(format!(
                    "{}({})",
                    rator.codegen_to_js()?,
                    codegen_list(rands)?.join(",")
                )),
            },
            // Emission never grows `let` syntax of its own: the form is
            // rewritten into an application of a lambda and re-emitted.
            LetExp(bindings, body) => rewrite_let(bindings, body).codegen_to_js(),
            LetStarExp(_, _) => Err(PassError::Unsupported("let*")),
        }
    }
}

fn codegen_list(cexps: Vec<CExp>) -> Result<Vec<String>, PassError> {
    cexps.into_iter().map(|c| c.codegen_to_js()).collect()
}

fn codegen_lambda(params: Vec<VarDecl>, mut body: Vec<CExp>) -> Result<String, PassError> {
    if body.len() != 1 {
        return Err(PassError::Unsupported("multi-expression lambda body"));
    }
    let only = body.remove(0);
    Ok(format!(
        "(({}) => {})",
        params
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>()
            .join(","),
        only.codegen_to_js()?
    ))
}

/// A primitive used as a value rather than applied. Type predicates
/// become inline closures over `typeof`; the rest map to their operator
/// token.
fn prim_value(op: &str) -> String {
    match op {
        "=" | "eq?" => "===".to_owned(),
        "number?" => "((x) => (typeof (x) === \"number\"))".to_owned(),
        "boolean?" => "((x) => (typeof (x) === \"boolean\"))".to_owned(),
        "symbol?" => "((x) => (typeof (x) === \"symbol\"))".to_owned(),
        "string?" => "((x) => (typeof (x) === \"string\"))".to_owned(),
        _ => op.to_owned(),
    }
}

lazy_static! {
    static ref INFIX_OPS: HashMap<&'static str, &'static str> = {
        let mut ops = HashMap::new();
        ops.insert("=", "===");
        ops.insert("eq?", "===");
        ops.insert("and", "&&");
        ops.insert("or", "||");
        ops
    };
}

fn infix_op(op: &str) -> &str {
    INFIX_OPS.get(op).copied().unwrap_or(op)
}

fn codegen_prim_apply(op: Ident, rands: Vec<CExp>) -> Result<String, PassError> {
    match op.as_str() {
        "number?" | "boolean?" | "symbol?" | "string?" => {
            let rand = one_operand(op.clone(), rands)?.codegen_to_js()?;
            Ok(format!("{}({})", prim_value(op.as_str()), rand))
        }
        "not" => {
            let rand = one_operand(op, rands)?.codegen_to_js()?;
            Ok(format!("(!{})", rand))
        }
        "string=?" => {
            let (lhs, rhs) = two_operands(op, rands)?;
            Ok(format!("({} === {})", lhs.codegen_to_js()?, rhs.codegen_to_js()?))
        }
        _ => {
            let rands = codegen_list(rands)?;
            Ok(format!(
                "({})",
                rands.join(&format!(" {} ", infix_op(op.as_str())))
            ))
        }
    }
}

fn one_operand(op: Ident, mut rands: Vec<CExp>) -> Result<CExp, PassError> {
    match rands.len() {
        1 => Ok(rands.remove(0)),
        n => Err(PassError::PrimArity(op, n)),
    }
}

fn two_operands(op: Ident, mut rands: Vec<CExp>) -> Result<(CExp, CExp), PassError> {
    match rands.len() {
        2 => {
            let rhs = rands.remove(1);
            let lhs = rands.remove(0);
            Ok((lhs, rhs))
        }
        n => Err(PassError::PrimArity(op, n)),
    }
}
