//! Terms built by the synthesis algorithms.
//!
//! A [`Term`] is an owned tree over the Łukasiewicz connectives used by
//! McNaughton's construction. It renders (via `Display`) into the string
//! grammar accepted by [`formula::build_ast`][crate::formula::build_ast], which
//! is the interchange format between synthesis, composition and evaluation.

use std::fmt;

use crate::connective::{UnaryOp, CONJ, DISJ, NEG};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Term {
    False,
    True,
    /// Input variable `x{i}` (1-indexed).
    Var(usize),
    Neg(Box<Term>),
    Delta(u32, Box<Term>),
    Conj(Box<Term>, Box<Term>),
    Disj(Box<Term>, Box<Term>),
}

impl Term {
    pub fn constant(value: bool) -> Self {
        if value {
            Term::True
        } else {
            Term::False
        }
    }

    pub fn var(index: usize) -> Self {
        assert_ne!(index, 0, "Variable indices should be >= 1");
        Term::Var(index)
    }

    pub fn neg(term: Self) -> Self {
        Term::Neg(Box::new(term))
    }

    pub fn delta(k: u32, term: Self) -> Self {
        assert_ne!(k, 0, "Scale should be >= 1");
        Term::Delta(k, Box::new(term))
    }

    pub fn conj(lhs: Self, rhs: Self) -> Self {
        Term::Conj(Box::new(lhs), Box::new(rhs))
    }

    pub fn disj(lhs: Self, rhs: Self) -> Self {
        Term::Disj(Box::new(lhs), Box::new(rhs))
    }

    /// Syntactic truth check: `1` or `(¬0)`.
    ///
    /// A term that merely evaluates to 1 everywhere is not recognized.
    pub fn is_true(&self) -> bool {
        match self {
            Term::True => true,
            Term::Neg(inner) => **inner == Term::False,
            _ => false,
        }
    }

    /// Syntactic falsity check: `0` or `(¬1)`.
    pub fn is_false(&self) -> bool {
        match self {
            Term::False => true,
            Term::Neg(inner) => **inner == Term::True,
            _ => false,
        }
    }

    /// Number of connectives and leaves.
    pub fn size(&self) -> usize {
        match self {
            Term::False | Term::True | Term::Var(_) => 1,
            Term::Neg(t) | Term::Delta(_, t) => 1 + t.size(),
            Term::Conj(a, b) | Term::Disj(a, b) => 1 + a.size() + b.size(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::False => write!(f, "0"),
            Term::True => write!(f, "1"),
            Term::Var(i) => write!(f, "x{}", i),
            Term::Neg(t) => write!(f, "({}{})", NEG, t),
            // The space keeps a constant operand apart from the digits of `k`.
            Term::Delta(k, t) => write!(f, "({} {})", UnaryOp::Delta(*k), t),
            Term::Conj(a, b) => write!(f, "({}{}{})", a, CONJ, b),
            Term::Disj(a, b) => write!(f, "({}{}{})", a, DISJ, b),
        }
    }
}
