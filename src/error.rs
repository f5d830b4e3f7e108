use num_bigint::BigInt;
use thiserror::Error;

/// Errors raised while parsing, evaluating or composing terms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The formula string does not follow the term grammar.
    #[error("invalid formula `{formula}`: {reason}")]
    InvalidFormula { formula: String, reason: String },

    /// The valuation has no value for an atom occurring in the formula.
    #[error("atom `{0}` is not bound by the valuation")]
    UnboundAtom(String),

    /// The logic leaves the requested truth function unimplemented.
    #[error("{operation} is not implemented for {logic} logic")]
    UnsupportedOperation {
        logic: &'static str,
        operation: &'static str,
    },

    /// The common denominator of a weight row is too large for a `δ_k` index.
    #[error("scale factor {0} does not fit a δ_k index")]
    ScaleOverflow(BigInt),

    /// The network (or its per-neuron term table) has an unusable shape.
    #[error("invalid network: {0}")]
    InvalidNetwork(String),
}

impl Error {
    pub(crate) fn invalid_formula(formula: &str, reason: impl Into<String>) -> Self {
        Error::InvalidFormula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
