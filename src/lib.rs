//! # mcnaughton-rs: Łukasiewicz terms for clipped-ReLU networks
//!
//! **`mcnaughton-rs`** turns a neural network with clipped-ReLU activations
//! `σ(x) = min(max(x, 0), 1)` and rational weights into a single term of
//! **Łukasiewicz logic** computing the same function, and evaluates such terms
//! under several many-valued semantics.
//!
//! ## Why is this possible?
//!
//! McNaughton's theorem states that the functions `[0,1]^n → [0,1]` definable
//! by Łukasiewicz terms are exactly the continuous piecewise-linear functions
//! with integer coefficients. Every clipped-ReLU neuron with integer weights is
//! such a function, and rational weights are reached with the scaling
//! connective `δ_k` (division by `k`). The [`synthesis`] module implements the
//! construction constructively, one neuron at a time; [`compose`] glues the
//! neurons of consecutive layers together.
//!
//! ## Key Features
//!
//! - **Term synthesis**: two interchangeable rational constructions, cross-checked against each other.
//! - **Formula engine**: parser from the parenthesized string form to an AST, with an optional subformula cache that shares identical subterms.
//! - **Pluggable semantics**: [`Lukasiewicz`][logic::Lukasiewicz], [`Godel`][logic::Godel] and a placeholder [`Product`][logic::Product], behind the [`Logic`][logic::Logic] trait.
//!
//! ## Basic Usage
//!
//! ```rust
//! use mcnaughton_rs::compose::network_term;
//! use mcnaughton_rs::eval::{evaluate, Valuation};
//! use mcnaughton_rs::formula::parse;
//! use mcnaughton_rs::logic::Lukasiewicz;
//! use mcnaughton_rs::network::{CReluNetwork, Layer};
//! use mcnaughton_rs::rational::ratio;
//! use mcnaughton_rs::synthesis::Strategy;
//!
//! // 1. A one-neuron network: σ(x1/2 + x2/2)
//! let layer = Layer::new(vec![vec![ratio(1, 2), ratio(1, 2)]], vec![ratio(0, 1)]).unwrap();
//! let net = CReluNetwork::new(vec![layer]).unwrap();
//!
//! // 2. Synthesize its term
//! let term = network_term(&net, Strategy::Scaled).unwrap();
//! assert_eq!(term, "((δ_2 (x2⊕x1))⊕(δ_2 (x1⊙x2)))");
//!
//! // 3. Parse and evaluate it
//! let root = parse(&term).unwrap();
//! let value = evaluate(&root, &Valuation::from_inputs(&[0.4, 0.8]), &Lukasiewicz).unwrap();
//! assert!((value - 0.6).abs() < 1e-9);
//! ```
//!
//! ## Core Components
//!
//! - **[`formula`]**: the term grammar, [`build_ast`][formula::build_ast] and [`build_ast_cached`][formula::build_ast_cached].
//! - **[`eval`]**: evaluation of an AST under a [`Valuation`][eval::Valuation] and a logic.
//! - **[`synthesis`]**: McNaughton's construction for a single neuron.
//! - **[`compose`]**: substitution of neuron terms across layers.

pub mod compose;
pub mod connective;
pub mod error;
pub mod eval;
pub mod formula;
pub mod logic;
pub mod network;
pub mod random;
pub mod rational;
pub mod synthesis;
pub mod term;

pub use error::{Error, Result};
