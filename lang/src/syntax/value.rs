use crate::syntax::tree::Ident;
use crate::syntax::value::SExpValue::{
    BoolSExp, CompoundSExp, EmptySExp, NumberSExp, StringSExp, SymbolSExp,
};
use std::fmt::Formatter;

/// A quoted datum. Opaque to the rewrite passes: they carry it through
/// unchanged, only the code generator renders it.
#[derive(Debug, PartialEq, Clone)]
pub enum SExpValue {
    NumberSExp(f64),
    BoolSExp(bool),
    StringSExp(String),
    SymbolSExp(Ident),
    EmptySExp,
    CompoundSExp(Box<SExpValue>, Box<SExpValue>),
}

impl std::fmt::Display for SExpValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberSExp(v) => write!(f, "{}", v),
            BoolSExp(true) => write!(f, "#t"),
            BoolSExp(false) => write!(f, "#f"),
            StringSExp(v) => write!(f, "\"{}\"", v),
            SymbolSExp(v) => write!(f, "{}", v),
            EmptySExp => write!(f, "()"),
            CompoundSExp(car, cdr) => {
                write!(f, "({}", car)?;
                let mut tail: &SExpValue = cdr;
                loop {
                    match tail {
                        CompoundSExp(head, rest) => {
                            write!(f, " {}", head)?;
                            tail = rest;
                        }
                        EmptySExp => return write!(f, ")"),
                        datum => return write!(f, " . {})", datum),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cons(car: SExpValue, cdr: SExpValue) -> SExpValue {
        CompoundSExp(Box::new(car), Box::new(cdr))
    }

    #[test]
    fn displays_proper_lists() {
        let datum = cons(
            SymbolSExp("a".to_owned()),
            cons(NumberSExp(1.0), cons(BoolSExp(true), EmptySExp)),
        );
        assert_eq!(format!("{}", datum), "(a 1 #t)");
    }

    #[test]
    fn displays_dotted_pairs() {
        let datum = cons(NumberSExp(1.0), NumberSExp(2.0));
        assert_eq!(format!("{}", datum), "(1 . 2)");
    }

    #[test]
    fn displays_the_empty_list() {
        assert_eq!(format!("{}", EmptySExp), "()");
    }
}
