use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::formula::{Node, NodeKind};
use crate::logic::Logic;

/// Assignment of truth values to atom names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    values: HashMap<String, f64>,
}

impl Valuation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `x1, x2, ...` to the given inputs, in order.
    pub fn from_inputs(inputs: &[f64]) -> Self {
        inputs
            .iter()
            .enumerate()
            .map(|(i, &value)| (format!("x{}", i + 1), value))
            .collect()
    }

    pub fn insert(&mut self, atom: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(atom.into(), value)
    }

    pub fn get(&self, atom: &str) -> Option<f64> {
        self.values.get(atom).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Valuation {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(atom, value)| (atom.into(), value)).collect(),
        }
    }
}

fn leaf_value(name: &str, valuation: &Valuation) -> Result<f64> {
    if let Some(value) = valuation.get(name) {
        return Ok(value);
    }
    match name {
        "0" => Ok(0.0),
        "1" => Ok(1.0),
        _ => Err(Error::UnboundAtom(name.to_string())),
    }
}

/// Evaluates the tree rooted at `node` under `valuation` and `logic`.
///
/// Shared subtrees are evaluated once per occurrence.
pub fn evaluate<L: Logic + ?Sized>(node: &Node, valuation: &Valuation, logic: &L) -> Result<f64> {
    match &node.kind {
        NodeKind::Leaf(name) => leaf_value(name, valuation),
        NodeKind::Unary(op, child) => {
            let x = evaluate(child, valuation, logic)?;
            op.apply(logic, x)
        }
        NodeKind::Binary(op, left, right) => {
            let x = evaluate(left, valuation, logic)?;
            let y = evaluate(right, valuation, logic)?;
            op.apply(logic, x, y)
        }
    }
}

/// Like [`evaluate`], but each distinct node (by identity) is evaluated only once.
///
/// Useful for the DAGs produced by [`build_ast_cached`][crate::formula::build_ast_cached].
pub fn evaluate_memoized<L: Logic + ?Sized>(node: &Node, valuation: &Valuation, logic: &L) -> Result<f64> {
    let mut cache = HashMap::new();
    evaluate_with(node, valuation, logic, &mut cache)
}

fn evaluate_with<L: Logic + ?Sized>(
    node: &Node,
    valuation: &Valuation,
    logic: &L,
    cache: &mut HashMap<*const Node, f64>,
) -> Result<f64> {
    let key = node as *const Node;
    if let Some(&value) = cache.get(&key) {
        return Ok(value);
    }

    let value = match &node.kind {
        NodeKind::Leaf(name) => leaf_value(name, valuation)?,
        NodeKind::Unary(op, child) => {
            let x = evaluate_with(child, valuation, logic, cache)?;
            op.apply(logic, x)?
        }
        NodeKind::Binary(op, left, right) => {
            let x = evaluate_with(left, valuation, logic, cache)?;
            let y = evaluate_with(right, valuation, logic, cache)?;
            op.apply(logic, x, y)?
        }
    };

    cache.insert(key, value);
    Ok(value)
}
