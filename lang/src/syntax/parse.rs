use std::collections::HashSet;

use pest::{
    error::Error,
    iterators::{Pair, Pairs},
    Parser,
};

use crate::{
    syntax::{
        tree::{
            Binding,
            CExp::{
                self, AppExp, BoolExp, IfExp, LetExp, LetStarExp, LitExp, NumExp, PrimOp, ProcExp,
                StrExp, VarRef,
            },
            Exp,
            Exp::{DefineExp, ExpItem},
            Program, VarDecl,
        },
        value::SExpValue,
        value::SExpValue::{BoolSExp, CompoundSExp, EmptySExp, NumberSExp, StringSExp, SymbolSExp},
    },
    CompileError,
};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub struct LiParser;

pub type ParseError = Error<Rule>;

/// Names the parser recognizes as built-in operators rather than
/// plain variable references.
pub static PRIM_OPS: &[&str] = &[
    "+", "-", "*", "/", "=", "<", ">", "<=", ">=", "not", "and", "or", "eq?", "string=?",
    "number?", "boolean?", "symbol?", "string?",
];

lazy_static! {
    static ref PRIMITIVES: HashSet<&'static str> = PRIM_OPS.iter().copied().collect();
}

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(name)
}

impl LiParser {
    pub fn ast(input: &str) -> Result<Program, CompileError> {
        let li = LiParser::parse(Rule::unit, input);
        let pairs = li.map_err(CompileError::Parse)?;
        Ok(parse_unit(pairs))
    }
}

fn parse_unit(pairs: Pairs<Rule>) -> Program {
    pairs
        .into_iter()
        .flat_map(|unit| unit.into_inner())
        .filter_map(|node| match node.as_rule() {
            Rule::form => Some(parse_form(node)),
            Rule::EOI => None,
            _ => unreachable!("rule should be form"),
        })
        .collect()
}

fn parse_form(node: Pair<Rule>) -> Exp {
    let child = node.into_inner().next().unwrap();
    match child.as_rule() {
        Rule::define_form => parse_define(child),
        Rule::cexp => ExpItem(parse_cexp(child)),
        _ => unreachable!("form should be define or cexp"),
    }
}

fn parse_define(node: Pair<Rule>) -> Exp {
    let mut iter = node.into_inner();
    let _ = iter.next(); // kw_define
    let var = parse_var_decl(iter.next().unwrap());
    let val = parse_cexp(iter.next().unwrap());
    DefineExp(var, val)
}

fn parse_cexp(node: Pair<Rule>) -> CExp {
    let child = node.into_inner().next().unwrap();
    match child.as_rule() {
        Rule::literal => parse_lit(child),
        Rule::quoted => LitExp(parse_datum(child.into_inner().next().unwrap())),
        Rule::if_form => parse_if(child),
        Rule::lambda_form => parse_lambda(child),
        Rule::let_form => parse_let(child),
        Rule::let_star_form => parse_let_star(child),
        Rule::app_form => parse_app(child),
        Rule::ident => parse_ref(child.as_str()),
        _ => unreachable!("cexp inner should be a literal, a form or an identifier"),
    }
}

fn parse_ref(name: &str) -> CExp {
    match is_primitive(name) {
        true => PrimOp(name.to_owned()),
        false => VarRef(name.to_owned()),
    }
}

fn parse_lit(node: Pair<Rule>) -> CExp {
    let lit = node.into_inner().next().unwrap();
    match lit.as_rule() {
        Rule::number_lit => NumExp(lit.as_str().parse::<f64>().unwrap()),
        Rule::bool_lit => BoolExp(lit.as_str() == "#t"),
        Rule::string_lit => {
            let raw = lit.as_str();
            StrExp(unescaped(&raw[1..raw.len() - 1]))
        }
        _ => unreachable!("unsupported literal type: {:?}", lit.as_rule()),
    }
}

fn parse_if(node: Pair<Rule>) -> CExp {
    let mut iter = node.into_inner();
    let _ = iter.next(); // kw_if
    let test = parse_cexp(iter.next().unwrap());
    let then = parse_cexp(iter.next().unwrap());
    let alt = parse_cexp(iter.next().unwrap());
    IfExp(Box::new(test), Box::new(then), Box::new(alt))
}

fn parse_lambda(node: Pair<Rule>) -> CExp {
    let mut params = Vec::new();
    let mut body = Vec::new();
    for child in node.into_inner() {
        match child.as_rule() {
            Rule::kw_lambda => (),
            Rule::ident => params.push(parse_var_decl(child)),
            Rule::cexp => body.push(parse_cexp(child)),
            _ => unreachable!("lambda inner should be params or body"),
        }
    }
    ProcExp(params, body)
}

fn parse_let(node: Pair<Rule>) -> CExp {
    let (bindings, body) = parse_binding_form(node);
    LetExp(bindings, body)
}

fn parse_let_star(node: Pair<Rule>) -> CExp {
    let (bindings, body) = parse_binding_form(node);
    LetStarExp(bindings, body)
}

fn parse_binding_form(node: Pair<Rule>) -> (Vec<Binding>, Vec<CExp>) {
    let mut bindings = Vec::new();
    let mut body = Vec::new();
    for child in node.into_inner() {
        match child.as_rule() {
            Rule::kw_let | Rule::kw_let_star => (),
            Rule::binding => bindings.push(parse_binding(child)),
            Rule::cexp => body.push(parse_cexp(child)),
            _ => unreachable!("let inner should be bindings or body"),
        }
    }
    (bindings, body)
}

fn parse_binding(node: Pair<Rule>) -> Binding {
    let mut iter = node.into_inner();
    let var = parse_var_decl(iter.next().unwrap());
    let val = parse_cexp(iter.next().unwrap());
    Binding { var, val }
}

fn parse_app(node: Pair<Rule>) -> CExp {
    let mut iter = node.into_inner();
    let rator = parse_cexp(iter.next().unwrap());
    let rands = iter.map(parse_cexp).collect();
    AppExp(Box::new(rator), rands)
}

fn parse_var_decl(node: Pair<Rule>) -> VarDecl {
    VarDecl {
        name: node.as_str().to_owned(),
    }
}

fn parse_datum(node: Pair<Rule>) -> SExpValue {
    let child = node.into_inner().next().unwrap();
    match child.as_rule() {
        Rule::literal => parse_lit_datum(child),
        Rule::ident => SymbolSExp(child.as_str().to_owned()),
        Rule::list_datum => child
            .into_inner()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .fold(EmptySExp, |tail, head| {
                CompoundSExp(Box::new(parse_datum(head)), Box::new(tail))
            }),
        _ => unreachable!("datum should be a literal, a symbol or a list"),
    }
}

fn parse_lit_datum(node: Pair<Rule>) -> SExpValue {
    let lit = node.into_inner().next().unwrap();
    match lit.as_rule() {
        Rule::number_lit => NumberSExp(lit.as_str().parse::<f64>().unwrap()),
        Rule::bool_lit => BoolSExp(lit.as_str() == "#t"),
        Rule::string_lit => {
            let raw = lit.as_str();
            StringSExp(unescaped(&raw[1..raw.len() - 1]))
        }
        _ => unreachable!("unsupported literal type: {:?}", lit.as_rule()),
    }
}

fn unescaped(input: &str) -> String {
    let mut str = String::with_capacity(input.len());
    let mut escape = false;
    for ch in input.chars() {
        if escape {
            escape = false;
            str.push(unescaped_char(ch));
        } else {
            match ch {
                '\\' => escape = true,
                _ => str.push(ch),
            }
        }
    }
    str
}

fn unescaped_char(ch: char) -> char {
    match ch {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        '0' => '\0',
        '\'' => '\'',
        '\"' => '\"',
        '\\' => '\\',
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defines_and_refs() {
        let ast = LiParser::ast("(define x 1) x").unwrap();
        assert_eq!(
            ast,
            vec![
                DefineExp(
                    VarDecl {
                        name: "x".to_owned()
                    },
                    NumExp(1.0)
                ),
                ExpItem(VarRef("x".to_owned())),
            ]
        );
    }

    #[test]
    fn primitive_names_parse_as_prim_ops() {
        let ast = LiParser::ast("(+ 1 2)").unwrap();
        assert_eq!(
            ast,
            vec![ExpItem(AppExp(
                Box::new(PrimOp("+".to_owned())),
                vec![NumExp(1.0), NumExp(2.0)],
            ))]
        );
    }

    #[test]
    fn keyword_prefixed_identifiers_are_plain_applications() {
        let ast = LiParser::ast("(iffy 1)").unwrap();
        assert_eq!(
            ast,
            vec![ExpItem(AppExp(
                Box::new(VarRef("iffy".to_owned())),
                vec![NumExp(1.0)],
            ))]
        );
    }

    #[test]
    fn let_star_bindings_keep_their_order() {
        let ast = LiParser::ast("(let* ((a 1) (b 2) (c 3)) c)").unwrap();
        match &ast[0] {
            ExpItem(LetStarExp(bindings, body)) => {
                let names: Vec<&str> = bindings.iter().map(|b| b.var.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b", "c"]);
                assert_eq!(body, &vec![VarRef("c".to_owned())]);
            }
            other => panic!("expected a let* form, got {:?}", other),
        }
    }

    #[test]
    fn parses_quoted_data() {
        let ast = LiParser::ast("'(a 1)").unwrap();
        assert_eq!(
            ast,
            vec![ExpItem(LitExp(CompoundSExp(
                Box::new(SymbolSExp("a".to_owned())),
                Box::new(CompoundSExp(
                    Box::new(NumberSExp(1.0)),
                    Box::new(EmptySExp),
                )),
            )))]
        );
    }

    #[test]
    fn rejects_unterminated_forms() {
        assert!(LiParser::ast("(let ((x 1))").is_err());
    }
}
