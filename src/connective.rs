//! The connective alphabet of the term language.
//!
//! Terms are written over the unary connectives `¬` and `δ_k`, and the binary
//! connectives `⊙`, `⊕`, `⇒`, `==` and `!=`. Precedence is never consulted:
//! every compound subterm is parenthesized.

use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    /// Negation `¬`.
    Neg,
    /// Scaling `δ_k`, dividing the operand's value by `k >= 1`.
    Delta(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    /// Strong conjunction `⊙`.
    Conj,
    /// Strong disjunction `⊕`.
    Disj,
    /// Implication `⇒`.
    Implies,
    /// Value equality `==`.
    Equals,
    /// Value inequality `!=`.
    Unequals,
}

pub const NEG: char = '¬';
pub const DELTA: char = 'δ';
pub const CONJ: char = '⊙';
pub const DISJ: char = '⊕';
pub const IMPLIES: char = '⇒';

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Conj,
        BinaryOp::Disj,
        BinaryOp::Implies,
        BinaryOp::Equals,
        BinaryOp::Unequals,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Conj => "⊙",
            BinaryOp::Disj => "⊕",
            BinaryOp::Implies => "⇒",
            BinaryOp::Equals => "==",
            BinaryOp::Unequals => "!=",
        }
    }

    /// Single-character binary connective, if `c` is one.
    ///
    /// `==` and `!=` are two characters wide and are not matched here.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            CONJ => Some(BinaryOp::Conj),
            DISJ => Some(BinaryOp::Disj),
            IMPLIES => Some(BinaryOp::Implies),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "{}", NEG),
            UnaryOp::Delta(k) => write!(f, "{}_{}", DELTA, k),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
