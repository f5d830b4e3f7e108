//! Random formulas, for property tests and demos.

use rand::Rng;

use crate::connective::{BinaryOp, UnaryOp};

/// The shape of the next subformula chosen by [`random_formula`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shape {
    /// Stop early with an atom.
    Atom,
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Shape {
    /// `¬`, `⊙`, `⊕` and `⇒`.
    pub const LUKASIEWICZ: [Shape; 4] = [
        Shape::Unary(UnaryOp::Neg),
        Shape::Binary(BinaryOp::Conj),
        Shape::Binary(BinaryOp::Disj),
        Shape::Binary(BinaryOp::Implies),
    ];
}

/// Generates a random formula over `atoms` of depth at most `max_depth`.
///
/// Each compound subformula picks its shape uniformly from `shapes`; at depth
/// 0 (or with no shapes) an atom is picked instead.
///
/// # Panics
///
/// Panics if `atoms` is empty.
pub fn random_formula<R: Rng + ?Sized>(rng: &mut R, atoms: &[&str], shapes: &[Shape], max_depth: usize) -> String {
    assert!(!atoms.is_empty(), "At least one atom is required");

    let shape = if max_depth == 0 || shapes.is_empty() {
        Shape::Atom
    } else {
        shapes[rng.random_range(0..shapes.len())]
    };

    match shape {
        Shape::Atom => atoms[rng.random_range(0..atoms.len())].to_string(),
        Shape::Unary(UnaryOp::Neg) => {
            format!("(¬{})", random_formula(rng, atoms, shapes, max_depth - 1))
        }
        Shape::Unary(op) => {
            format!("({} {})", op, random_formula(rng, atoms, shapes, max_depth - 1))
        }
        Shape::Binary(op) => {
            let left = random_formula(rng, atoms, shapes, max_depth - 1);
            let right = random_formula(rng, atoms, shapes, max_depth - 1);
            format!("({}{}{})", left, op, right)
        }
    }
}
