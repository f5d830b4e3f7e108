//! McNaughton term synthesis.
//!
//! Given a rational weight vector `w` and bias `b`, the functions in this
//! module build a Łukasiewicz term `T(x1, ..., xn)` whose value equals the
//! clipped linear function
//!
//! ```text
//! σ(w·x + b) = min(max(w·x + b, 0), 1)
//! ```
//!
//! for every `x ∈ [0,1]^n`.
//!
//! The construction rests on two identities. For integer weights and any
//! real-valued `g`, `y ∈ [0,1]`:
//!
//! ```text
//! σ(g + y) = (σ(g) ⊕ y) ⊙ σ(g + 1)        (decrement)
//! σ(f)     = ¬σ(1 - f)                     (reflection)
//! ```
//!
//! [`sigma_construct`] applies them to integer weights, peeling one unit off
//! the first positive weight per step. Rational weights are handled in two
//! ways:
//!
//! - [`sigma_construct_rational`] scales everything by the common denominator
//!   `L` and sums `L` shifted integer constructions, each divided by `L`:
//!   `σ(f) = Σ_{i<L} δ_L σ(L·f - i)`.
//! - [`sigma_construct_rational_from_paper`] keeps the rational weights and
//!   writes fractional coefficients `k/L` directly as `k` copies of `δ_L x`.
//!
//! Both produce different strings for the same function; they are kept side
//! by side to cross-check each other.

use std::fmt::Display;

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::Result;
use crate::rational::{scale_of, scaled};
use crate::term::Term;

/// The clipped-ReLU activation `min(max(x, 0), 1)`.
pub fn sigma_activation(x: f64) -> f64 {
    x.max(0.0).min(1.0)
}

/// Which rational construction to use.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// [`sigma_construct_rational`].
    #[default]
    Scaled,
    /// [`sigma_construct_rational_from_paper`].
    FromPaper,
}

/// Builds the term of `σ(w·x + b)` using the common denominator of `w` and `b`.
pub fn synthesize(weights: &[BigRational], bias: &BigRational, strategy: Strategy) -> Result<Term> {
    let lcm = scale_of(weights, bias)?;
    Ok(match strategy {
        Strategy::Scaled => sigma_construct_rational(weights, bias, lcm),
        Strategy::FromPaper => sigma_construct_rational_from_paper(weights, bias, lcm),
    })
}

/// Index of the first strictly positive weight.
pub(crate) fn pivot<T: Signed>(weights: &[T]) -> Option<usize> {
    weights.iter().position(Signed::is_positive)
}

fn row<T: Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Assembles `(σ(g) ⊕ y) ⊙ σ(g + 1)` from `left = σ(g)` and `right = σ(g + 1)`.
///
/// Constants are only recognized syntactically (see [`Term::is_true`]).
fn combine(left: Term, y: Term, right: Term) -> Term {
    if right.is_false() {
        return Term::False;
    }
    if left.is_true() {
        return right;
    }
    if right.is_true() {
        return if left.is_false() { y } else { Term::disj(left, y) };
    }
    if left.is_false() {
        return Term::conj(y, right);
    }
    Term::conj(Term::disj(left, y), right)
}

/// `copies` summands of `δ_lcm operand`, folded with `⊕`.
fn delta_chain(lcm: u32, operand: &Term, copies: &BigInt) -> Term {
    let mut term = Term::delta(lcm, operand.clone());
    let mut count = BigInt::one();
    while &count < copies {
        term = Term::disj(term, Term::delta(lcm, operand.clone()));
        count += 1u32;
    }
    term
}

/// Term of `σ(w·x + b)` for integer weights and bias.
pub fn sigma_construct(weights: &[BigInt], bias: &BigInt) -> Term {
    if weights.iter().all(Zero::is_zero) {
        // For an integer bias, σ(b) is exactly 0 or 1.
        return Term::constant(bias.is_positive());
    }

    if weights.iter().all(|w| !w.is_positive()) {
        debug!("sigma_construct(w = {}, b = {}): reflect", row(weights), bias);
        let negated: Vec<BigInt> = weights.iter().map(|w| -w).collect();
        return Term::neg(sigma_construct(&negated, &(BigInt::one() - bias)));
    }

    let idx = pivot(weights).expect("non-positive weights are reflected above");
    debug!("sigma_construct(w = {}, b = {}): decrement x{}", row(weights), bias, idx + 1);

    let mut reduced = weights.to_vec();
    reduced[idx] -= 1u32;
    let left = sigma_construct(&reduced, bias);
    let right = sigma_construct(&reduced, &(bias + 1u32));
    combine(left, Term::var(idx + 1), right)
}

/// Term of `σ(w·x + b)` for rational weights whose denominators divide `lcm`.
///
/// Computed as `δ_L σ(W·x + B) ⊕ δ_L σ(W·x + B - 1) ⊕ ... ⊕ δ_L σ(W·x + B - L + 1)`
/// with `W = L·w`, `B = L·b`. For `lcm == 1` this is [`sigma_construct`].
pub fn sigma_construct_rational(weights: &[BigRational], bias: &BigRational, lcm: u32) -> Term {
    let int_weights: Vec<BigInt> = weights.iter().map(|w| scaled(w, lcm)).collect();
    let int_bias = scaled(bias, lcm);
    debug!(
        "sigma_construct_rational(w = {}, b = {}, lcm = {})",
        row(weights),
        bias,
        lcm
    );

    if lcm == 1 {
        return sigma_construct(&int_weights, &int_bias);
    }

    let mut term = Term::delta(lcm, sigma_construct(&int_weights, &int_bias));
    for i in 1..lcm {
        let shifted = sigma_construct(&int_weights, &(&int_bias - i));
        term = Term::disj(term, Term::delta(lcm, shifted));
    }
    term
}

/// Term of `σ(w·x + b)` for rational weights whose denominators divide `lcm`,
/// writing fractional coefficients directly as `δ_lcm` chains.
pub fn sigma_construct_rational_from_paper(weights: &[BigRational], bias: &BigRational, lcm: u32) -> Term {
    let one = BigRational::one();

    if weights.iter().all(Zero::is_zero) {
        if !bias.is_positive() || bias >= &one {
            return Term::constant(bias.is_positive());
        }
        // 0 < b < 1: b = k/L is k copies of δ_L 1.
        return delta_chain(lcm, &Term::True, &scaled(bias, lcm));
    }

    if weights.iter().all(|w| !w.is_positive()) {
        debug!("from_paper(w = {}, b = {}): reflect", row(weights), bias);
        let negated: Vec<BigRational> = weights.iter().map(|w| -w).collect();
        return Term::neg(sigma_construct_rational_from_paper(&negated, &(&one - bias), lcm));
    }

    let idx = pivot(weights).expect("non-positive weights are reflected above");
    let mut reduced = weights.to_vec();

    if weights.iter().all(|w| w < &one) {
        // 0 < w[idx] < 1: the whole coefficient is consumed at once.
        debug!("from_paper(w = {}, b = {}): fractional x{}", row(weights), bias, idx + 1);
        let copies = scaled(&weights[idx], lcm);
        reduced[idx] = BigRational::zero();
        let left = sigma_construct_rational_from_paper(&reduced, bias, lcm);
        let right = sigma_construct_rational_from_paper(&reduced, &(bias + &one), lcm);
        let y = delta_chain(lcm, &Term::var(idx + 1), &copies);
        return combine(left, y, right);
    }

    debug!("from_paper(w = {}, b = {}): decrement x{}", row(weights), bias, idx + 1);
    reduced[idx] -= &one;
    let left = sigma_construct_rational_from_paper(&reduced, bias, lcm);
    let right = sigma_construct_rational_from_paper(&reduced, &(bias + &one), lcm);
    combine(left, Term::var(idx + 1), right)
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_traits::ToPrimitive;
    use test_log::test;

    use crate::eval::{evaluate, Valuation};
    use crate::formula::parse;
    use crate::logic::Lukasiewicz;
    use crate::rational::ratio;

    const EPS: f64 = 1e-9;

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    fn rats(values: &[(i64, i64)]) -> Vec<BigRational> {
        values.iter().map(|&(n, d)| ratio(n, d)).collect()
    }

    fn eval_term(term: &Term, inputs: &[f64]) -> f64 {
        let root = parse(&term.to_string()).unwrap();
        evaluate(&root, &Valuation::from_inputs(inputs), &Lukasiewicz).unwrap()
    }

    fn expected(weights: &[BigRational], bias: &BigRational, inputs: &[f64]) -> f64 {
        let dot: f64 = weights
            .iter()
            .zip(inputs)
            .map(|(w, x)| w.to_f64().unwrap() * x)
            .sum();
        sigma_activation(dot + bias.to_f64().unwrap())
    }

    /// All points of the grid `{0, 1/4, ..., 1}^n`, plus a few off-grid ones.
    fn points(n: usize) -> Vec<Vec<f64>> {
        let mut values: Vec<f64> = (0..=4).map(|i| i as f64 / 4.0).collect();
        values.extend([0.1, 0.3, 0.65, 0.9]);
        let mut result = vec![vec![]];
        for _ in 0..n {
            result = result
                .into_iter()
                .flat_map(|prefix| {
                    values.iter().map(move |&v| {
                        let mut p = prefix.clone();
                        p.push(v);
                        p
                    })
                })
                .collect();
        }
        result
    }

    fn check_equivalence(weights: &[BigRational], bias: &BigRational) {
        let scaled_term = synthesize(weights, bias, Strategy::Scaled).unwrap();
        let paper_term = synthesize(weights, bias, Strategy::FromPaper).unwrap();
        for x in points(weights.len()) {
            let want = expected(weights, bias, &x);
            let got_scaled = eval_term(&scaled_term, &x);
            let got_paper = eval_term(&paper_term, &x);
            assert!((got_scaled - want).abs() < EPS, "scaled {} at {:?}: {} != {}", scaled_term, x, got_scaled, want);
            assert!((got_paper - want).abs() < EPS, "paper {} at {:?}: {} != {}", paper_term, x, got_paper, want);
        }
    }

    #[test]
    fn test_sigma_activation() {
        assert_eq!(sigma_activation(-0.5), 0.0);
        assert_eq!(sigma_activation(0.25), 0.25);
        assert_eq!(sigma_activation(3.0), 1.0);
    }

    #[test]
    fn test_pivot() {
        assert_eq!(pivot(&ints(&[-1, 0, 2, 3])), Some(2));
        assert_eq!(pivot(&ints(&[0, -4])), None);
        assert_eq!(pivot(&rats(&[(-1, 2), (1, 3)])), Some(1));
        assert_eq!(pivot::<BigInt>(&[]), None);
    }

    #[test]
    fn test_integer_terms() {
        assert_eq!(sigma_construct(&ints(&[]), &BigInt::from(1)).to_string(), "1");
        assert_eq!(sigma_construct(&ints(&[0, 0]), &BigInt::from(0)).to_string(), "0");
        assert_eq!(sigma_construct(&ints(&[1]), &BigInt::from(0)).to_string(), "x1");
        assert_eq!(sigma_construct(&ints(&[-1]), &BigInt::from(1)).to_string(), "(¬x1)");
        assert_eq!(sigma_construct(&ints(&[1, -1]), &BigInt::from(0)).to_string(), "(x1⊙(¬x2))");
        assert_eq!(sigma_construct(&ints(&[2]), &BigInt::from(-1)).to_string(), "(x1⊙x1)");
        assert_eq!(sigma_construct(&ints(&[1, 1]), &BigInt::from(0)).to_string(), "(x2⊕x1)");
        assert_eq!(sigma_construct(&ints(&[1]), &BigInt::from(-1)).to_string(), "0");
    }

    #[test]
    fn test_zero_weight_boundaries() {
        let zeros = rats(&[(0, 1), (0, 1)]);
        for strategy in [Strategy::Scaled, Strategy::FromPaper] {
            assert_eq!(synthesize(&zeros, &ratio(-1, 1), strategy).unwrap().to_string(), "0");
            assert_eq!(synthesize(&zeros, &ratio(2, 1), strategy).unwrap().to_string(), "1");
            assert_eq!(synthesize(&[], &ratio(1, 1), strategy).unwrap().to_string(), "1");

            let half = synthesize(&zeros, &ratio(1, 2), strategy).unwrap();
            assert!(!half.is_true() && !half.is_false());
            assert!((eval_term(&half, &[0.3, 0.8]) - 0.5).abs() < EPS);
        }
        assert_eq!(
            synthesize(&zeros, &ratio(1, 2), Strategy::Scaled).unwrap().to_string(),
            "((δ_2 1)⊕(δ_2 0))"
        );
        assert_eq!(
            synthesize(&zeros, &ratio(1, 2), Strategy::FromPaper).unwrap().to_string(),
            "(δ_2 1)"
        );
        assert_eq!(
            synthesize(&zeros, &ratio(3, 4), Strategy::FromPaper).unwrap().to_string(),
            "(((δ_4 1)⊕(δ_4 1))⊕(δ_4 1))"
        );
    }

    #[test]
    fn test_integer_weights_skip_scaling() {
        let w = rats(&[(1, 1), (-1, 1)]);
        let term = sigma_construct_rational(&w, &ratio(0, 1), 1);
        assert_eq!(term.to_string(), "(x1⊙(¬x2))");
    }

    #[test]
    fn test_fractional_coefficient_chain() {
        // σ(x1/3) is a single δ_3 x1.
        let term = sigma_construct_rational_from_paper(&rats(&[(1, 3)]), &ratio(0, 1), 3);
        assert_eq!(term.to_string(), "(δ_3 x1)");
        let term = sigma_construct_rational_from_paper(&rats(&[(2, 3)]), &ratio(0, 1), 3);
        assert_eq!(term.to_string(), "((δ_3 x1)⊕(δ_3 x1))");
    }

    #[test]
    fn test_equivalence_integer() {
        check_equivalence(&rats(&[(1, 1), (-1, 1)]), &ratio(0, 1));
        check_equivalence(&rats(&[(2, 1), (-1, 1), (1, 1)]), &ratio(-1, 1));
        check_equivalence(&rats(&[(-2, 1)]), &ratio(3, 2));
    }

    #[test]
    fn test_equivalence_rational() {
        check_equivalence(&rats(&[(1, 2), (1, 2)]), &ratio(0, 1));
        check_equivalence(&rats(&[(1, 3), (-2, 3)]), &ratio(1, 3));
        check_equivalence(&rats(&[(3, 2)]), &ratio(-1, 4));
        check_equivalence(&rats(&[(-1, 1), (1, 2)]), &ratio(1, 2));
        check_equivalence(&rats(&[(1, 2), (-1, 4)]), &ratio(3, 4));
        check_equivalence(&rats(&[(1, 2), (1, 1)]), &ratio(-1, 2));
    }

    #[test]
    fn test_terms_reparse() {
        let w = rats(&[(1, 2), (-1, 3)]);
        let b = ratio(1, 6);
        for strategy in [Strategy::Scaled, Strategy::FromPaper] {
            let term = synthesize(&w, &b, strategy).unwrap().to_string();
            let root = parse(&term).unwrap();
            assert_eq!(root.to_string(), term);
            assert!(parse(&root.to_string()).unwrap().is_isomorphic(&root));
        }
    }
}
