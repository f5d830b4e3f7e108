//! Truth-function tables of the supported many-valued logics.
//!
//! A [`Logic`] only has to provide implication: falsum, verum, negation and
//! the strong connectives have default derivations
//!
//! ```text
//! ⊥ = 0        ⊤ = ⊥ ⇒ ⊥        ¬A = A ⇒ ⊥
//! A ⊙ B = ¬(A ⇒ ¬B)            A ⊕ B = ¬A ⇒ B
//! ```
//!
//! which concrete logics may override. `δ_k`, `==` and `!=` have no
//! derivation and fail unless a logic defines them.

use crate::connective::{BinaryOp, UnaryOp};
use crate::error::{Error, Result};

pub trait Logic {
    fn name(&self) -> &'static str;

    fn implies(&self, x: f64, y: f64) -> Result<f64>;

    fn falsum(&self) -> Result<f64> {
        Ok(0.0)
    }

    fn verum(&self) -> Result<f64> {
        let falsum = self.falsum()?;
        self.implies(falsum, falsum)
    }

    fn neg(&self, x: f64) -> Result<f64> {
        self.implies(x, self.falsum()?)
    }

    fn conj(&self, x: f64, y: f64) -> Result<f64> {
        self.neg(self.implies(x, self.neg(y)?)?)
    }

    fn disj(&self, x: f64, y: f64) -> Result<f64> {
        self.implies(self.neg(x)?, y)
    }

    fn delta(&self, _k: u32, _x: f64) -> Result<f64> {
        Err(self.unsupported("DELTA"))
    }

    fn equals(&self, _x: f64, _y: f64) -> Result<f64> {
        Err(self.unsupported("EQUALS"))
    }

    fn unequals(&self, _x: f64, _y: f64) -> Result<f64> {
        Err(self.unsupported("UNEQUALS"))
    }

    fn unsupported(&self, operation: &'static str) -> Error {
        Error::UnsupportedOperation {
            logic: self.name(),
            operation,
        }
    }
}

impl UnaryOp {
    /// Applies the truth function of this connective under `logic`.
    pub fn apply<L: Logic + ?Sized>(self, logic: &L, x: f64) -> Result<f64> {
        match self {
            UnaryOp::Neg => logic.neg(x),
            UnaryOp::Delta(k) => logic.delta(k, x),
        }
    }
}

impl BinaryOp {
    /// Applies the truth function of this connective under `logic`.
    pub fn apply<L: Logic + ?Sized>(self, logic: &L, x: f64, y: f64) -> Result<f64> {
        match self {
            BinaryOp::Conj => logic.conj(x, y),
            BinaryOp::Disj => logic.disj(x, y),
            BinaryOp::Implies => logic.implies(x, y),
            BinaryOp::Equals => logic.equals(x, y),
            BinaryOp::Unequals => logic.unequals(x, y),
        }
    }
}

/// Łukasiewicz logic, with `δ_k` and the equality tests.
#[derive(Debug, Default, Copy, Clone)]
pub struct Lukasiewicz;

impl Logic for Lukasiewicz {
    fn name(&self) -> &'static str {
        "Łukasiewicz"
    }

    // v(A ⇒ B) = min(1, 1 - v(A) + v(B))
    fn implies(&self, x: f64, y: f64) -> Result<f64> {
        Ok(f64::min(1.0, 1.0 - x + y))
    }

    // v(¬A) = 1 - v(A)
    fn neg(&self, x: f64) -> Result<f64> {
        Ok(1.0 - x)
    }

    // v(A ⊙ B) = max(0, v(A) + v(B) - 1)
    fn conj(&self, x: f64, y: f64) -> Result<f64> {
        Ok(f64::max(0.0, x + y - 1.0))
    }

    // v(A ⊕ B) = min(1, v(A) + v(B))
    fn disj(&self, x: f64, y: f64) -> Result<f64> {
        Ok(f64::min(1.0, x + y))
    }

    fn delta(&self, k: u32, x: f64) -> Result<f64> {
        Ok(x / k as f64)
    }

    fn equals(&self, x: f64, y: f64) -> Result<f64> {
        Ok(if x == y { 1.0 } else { 0.0 })
    }

    fn unequals(&self, x: f64, y: f64) -> Result<f64> {
        Ok(if x != y { 1.0 } else { 0.0 })
    }
}

/// Gödel logic. The strong and lattice connectives coincide: `⊙` is `min`, `⊕` is `max`.
#[derive(Debug, Default, Copy, Clone)]
pub struct Godel;

impl Logic for Godel {
    fn name(&self) -> &'static str {
        "Gödel"
    }

    fn implies(&self, x: f64, y: f64) -> Result<f64> {
        Ok(if x > y { y } else { 1.0 })
    }

    fn conj(&self, x: f64, y: f64) -> Result<f64> {
        Ok(f64::min(x, y))
    }

    fn disj(&self, x: f64, y: f64) -> Result<f64> {
        Ok(f64::max(x, y))
    }
}

/// Product logic. Placeholder: none of its truth functions are implemented yet.
#[derive(Debug, Default, Copy, Clone)]
pub struct Product;

impl Logic for Product {
    fn name(&self) -> &'static str {
        "Product"
    }

    fn implies(&self, _x: f64, _y: f64) -> Result<f64> {
        Err(self.unsupported("IMPLIES"))
    }

    fn neg(&self, _x: f64) -> Result<f64> {
        Err(self.unsupported("NEG"))
    }

    fn conj(&self, _x: f64, _y: f64) -> Result<f64> {
        Err(self.unsupported("CONJ"))
    }

    fn disj(&self, _x: f64, _y: f64) -> Result<f64> {
        Err(self.unsupported("DISJ"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    const EPS: f64 = 1e-9;

    fn grid() -> Vec<f64> {
        (0..=10).map(|i| i as f64 / 10.0).collect()
    }

    /// Only implication is given; everything else comes from the defaults.
    struct DerivedLukasiewicz;

    impl Logic for DerivedLukasiewicz {
        fn name(&self) -> &'static str {
            "derived"
        }
        fn implies(&self, x: f64, y: f64) -> Result<f64> {
            Lukasiewicz.implies(x, y)
        }
    }

    #[test]
    fn test_lukasiewicz_values() {
        let l = Lukasiewicz;
        assert!((l.conj(0.7, 0.5).unwrap() - 0.2).abs() < EPS);
        assert!((l.implies(0.7, 0.5).unwrap() - 0.8).abs() < EPS);
        assert!((l.neg(0.7).unwrap() - 0.3).abs() < EPS);
        assert_eq!(l.disj(0.7, 0.5).unwrap(), 1.0);
        assert!((l.delta(4, 0.8).unwrap() - 0.2).abs() < EPS);
        assert_eq!(l.equals(0.5, 0.5).unwrap(), 1.0);
        assert_eq!(l.equals(0.5, 0.4).unwrap(), 0.0);
        assert_eq!(l.unequals(0.5, 0.4).unwrap(), 1.0);
        assert_eq!(l.falsum().unwrap(), 0.0);
        assert_eq!(l.verum().unwrap(), 1.0);
    }

    #[test]
    fn test_defaults_agree_with_lukasiewicz() {
        let derived = DerivedLukasiewicz;
        for &x in &grid() {
            assert!((derived.neg(x).unwrap() - Lukasiewicz.neg(x).unwrap()).abs() < EPS);
            for &y in &grid() {
                let conj = derived.conj(x, y).unwrap();
                let disj = derived.disj(x, y).unwrap();
                assert!((conj - Lukasiewicz.conj(x, y).unwrap()).abs() < EPS);
                assert!((disj - Lukasiewicz.disj(x, y).unwrap()).abs() < EPS);
            }
        }
        assert!(matches!(
            derived.delta(2, 0.5),
            Err(Error::UnsupportedOperation { operation: "DELTA", .. })
        ));
    }

    #[test]
    fn test_godel() {
        let g = Godel;
        assert_eq!(g.implies(0.7, 0.5).unwrap(), 0.5);
        assert_eq!(g.implies(0.5, 0.7).unwrap(), 1.0);
        assert_eq!(g.conj(0.7, 0.5).unwrap(), 0.5);
        assert_eq!(g.disj(0.7, 0.5).unwrap(), 0.7);
        // Derived negation: ¬x = x ⇒ 0.
        assert_eq!(g.neg(0.0).unwrap(), 1.0);
        assert_eq!(g.neg(0.3).unwrap(), 0.0);
        assert_eq!(g.verum().unwrap(), 1.0);
        assert!(g.delta(2, 0.5).is_err());
        assert!(g.equals(0.5, 0.5).is_err());
        assert!(g.unequals(0.5, 0.5).is_err());
    }

    #[test]
    fn test_product_is_unimplemented() {
        let p = Product;
        let expected = |operation| Error::UnsupportedOperation {
            logic: "Product",
            operation,
        };
        assert_eq!(p.conj(0.5, 0.5), Err(expected("CONJ")));
        assert_eq!(p.disj(0.5, 0.5), Err(expected("DISJ")));
        assert_eq!(p.neg(0.5), Err(expected("NEG")));
        assert_eq!(p.implies(0.5, 0.5), Err(expected("IMPLIES")));
        assert_eq!(p.verum(), Err(expected("IMPLIES")));
    }

    #[test]
    fn test_codomain() {
        let logics: [&dyn Logic; 2] = [&Lukasiewicz, &Godel];
        for logic in logics {
            for &x in &grid() {
                let v = UnaryOp::Neg.apply(logic, x).unwrap();
                assert!((0.0..=1.0).contains(&v), "{} ¬{} = {}", logic.name(), x, v);
                for &y in &grid() {
                    for op in [BinaryOp::Conj, BinaryOp::Disj, BinaryOp::Implies] {
                        let v = op.apply(logic, x, y).unwrap();
                        assert!((0.0..=1.0).contains(&v), "{} {}{}{} = {}", logic.name(), x, op, y, v);
                    }
                }
            }
        }
    }

    #[test]
    fn test_dispatch() {
        let l = Lukasiewicz;
        assert_eq!(UnaryOp::Delta(2).apply(&l, 1.0).unwrap(), 0.5);
        assert_eq!(BinaryOp::Equals.apply(&l, 0.3, 0.3).unwrap(), 1.0);
        assert_eq!(BinaryOp::Unequals.apply(&l, 0.3, 0.3).unwrap(), 0.0);
        assert!(BinaryOp::Conj.apply(&Product, 0.3, 0.3).is_err());
    }
}
