//! Parsing terms into abstract syntax trees.
//!
//! A term is a fully parenthesized string such as `((x1⊕x2)⊙(¬x3))`.
//! [`subdivide`] peels one connective off a term, and [`build_ast`] applies it
//! recursively to obtain a [`Node`] tree. [`build_ast_cached`] does the same
//! while sharing every repeated subformula through a [`SubformulaCache`], so
//! the result is a DAG rather than a tree.
//!
//! ```
//! use mcnaughton_rs::formula::{build_ast, level_order};
//!
//! let (root, depth) = build_ast("(A⊙B)", 0).unwrap();
//! assert_eq!(depth, 1);
//! assert_eq!(
//!     level_order(&root),
//!     vec![("⊙".to_string(), 0), ("A".to_string(), 1), ("B".to_string(), 1)]
//! );
//! ```

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::connective::{BinaryOp, UnaryOp, DELTA, NEG};
use crate::error::{Error, Result};

/// One layer of a term, as returned by [`subdivide`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Split<'a> {
    /// No connective at nesting depth 0: an atom or a constant.
    Leaf(&'a str),
    /// A unary connective and its single operand.
    Unary(UnaryOp, &'a str),
    /// A binary connective with its left and right operands.
    Binary(BinaryOp, &'a str, &'a str),
}

/// Returns `true` for an atom: an ASCII letter followed by zero or more digits.
pub fn is_atom(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_digit())
}

/// Returns `true` for the constants `0` and `1`.
pub fn is_constant(token: &str) -> bool {
    token == "0" || token == "1"
}

fn unbalanced(formula: &str) -> Error {
    Error::invalid_formula(formula, "unbalanced parentheses")
}

/// Strips the outer parentheses if the opening one is closed by the last character.
fn strip_enclosing(formula: &str) -> Result<&str> {
    if !formula.starts_with('(') {
        return Ok(formula);
    }
    let mut depth = 0usize;
    for (i, c) in formula.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let enclosed = i + 1 == formula.len();
                    return Ok(if enclosed { &formula[1..i] } else { formula });
                }
            }
            _ => {}
        }
    }
    Err(unbalanced(formula))
}

/// Splits `formula` at its first connective on nesting depth 0.
///
/// One layer of enclosing parentheses is removed first. Unary connectives
/// (`¬`, `δ_k`) must start the remaining string, and their operand is
/// everything after them. If no connective occurs at depth 0, the whole
/// (stripped) string is returned as a [`Split::Leaf`]; leaf tokens are
/// validated by [`build_ast`], not here.
pub fn subdivide(formula: &str) -> Result<Split<'_>> {
    let inner = strip_enclosing(formula.trim())?;
    let mut depth = 0usize;
    let mut chars = inner.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or_else(|| unbalanced(formula))?,
            _ if depth > 0 => {}
            NEG | DELTA => {
                if !inner[..i].trim().is_empty() {
                    return Err(Error::invalid_formula(
                        formula,
                        format!("`{}` must start its subformula", c),
                    ));
                }
                let rest = &inner[i + c.len_utf8()..];
                return if c == NEG {
                    Ok(Split::Unary(UnaryOp::Neg, rest.trim()))
                } else {
                    subdivide_delta(formula, rest)
                };
            }
            '=' | '!' => {
                if !matches!(chars.peek(), Some((_, '='))) {
                    return Err(Error::invalid_formula(
                        formula,
                        format!("`{}` must be followed by `=`", c),
                    ));
                }
                let op = if c == '=' { BinaryOp::Equals } else { BinaryOp::Unequals };
                return Ok(Split::Binary(op, inner[..i].trim(), inner[i + 2..].trim()));
            }
            _ => {
                if let Some(op) = BinaryOp::from_char(c) {
                    let right = &inner[i + c.len_utf8()..];
                    return Ok(Split::Binary(op, inner[..i].trim(), right.trim()));
                }
            }
        }
    }

    if depth != 0 {
        return Err(unbalanced(formula));
    }
    Ok(Split::Leaf(inner))
}

/// Parses the `_k` suffix of `δ_k` and returns the operand that follows it.
fn subdivide_delta<'a>(formula: &str, rest: &'a str) -> Result<Split<'a>> {
    let digits = rest
        .strip_prefix('_')
        .ok_or_else(|| Error::invalid_formula(formula, "`δ` must be followed by `_k`"))?;
    let len = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if len == 0 {
        return Err(Error::invalid_formula(formula, "unterminated `δ_k` digit run"));
    }
    let k: u32 = digits[..len]
        .parse()
        .map_err(|_| Error::invalid_formula(formula, "`δ_k` scale out of range"))?;
    if k == 0 {
        return Err(Error::invalid_formula(formula, "`δ_k` scale must be positive"));
    }
    Ok(Split::Unary(UnaryOp::Delta(k), digits[len..].trim()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Atom or constant.
    Leaf(String),
    Unary(UnaryOp, Rc<Node>),
    Binary(BinaryOp, Rc<Node>, Rc<Node>),
}

/// A node of the abstract syntax tree.
///
/// Children are reference-counted so that [`build_ast_cached`] can share
/// identical subformulas. The depth is fixed when the node is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub depth: usize,
}

impl Node {
    pub fn new(kind: NodeKind, depth: usize) -> Rc<Self> {
        Rc::new(Node { kind, depth })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Connective symbol, or the atom/constant name for a leaf.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Leaf(name) => name.clone(),
            NodeKind::Unary(op, _) => op.to_string(),
            NodeKind::Binary(op, _, _) => op.to_string(),
        }
    }

    pub fn left(&self) -> Option<&Rc<Node>> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Unary(_, child) => Some(child),
            NodeKind::Binary(_, left, _) => Some(left),
        }
    }

    pub fn right(&self) -> Option<&Rc<Node>> {
        match &self.kind {
            NodeKind::Binary(_, _, right) => Some(right),
            _ => None,
        }
    }

    /// Number of nodes, counting shared subtrees once per occurrence.
    pub fn size(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Unary(_, child) => 1 + child.size(),
            NodeKind::Binary(_, left, right) => 1 + left.size() + right.size(),
        }
    }

    /// Structural equality of labels at every position, ignoring depths.
    pub fn is_isomorphic(&self, other: &Node) -> bool {
        match (&self.kind, &other.kind) {
            (NodeKind::Leaf(a), NodeKind::Leaf(b)) => a == b,
            (NodeKind::Unary(op1, a), NodeKind::Unary(op2, b)) => op1 == op2 && a.is_isomorphic(b),
            (NodeKind::Binary(op1, a1, b1), NodeKind::Binary(op2, a2, b2)) => {
                op1 == op2 && a1.is_isomorphic(a2) && b1.is_isomorphic(b2)
            }
            _ => false,
        }
    }
}

/// Prints the node back into the fully parenthesized term grammar.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Leaf(name) => f.write_str(name),
            NodeKind::Unary(UnaryOp::Neg, child) => write!(f, "({}{})", NEG, child),
            NodeKind::Unary(op @ UnaryOp::Delta(_), child) => write!(f, "({} {})", op, child),
            NodeKind::Binary(op, left, right) => write!(f, "({}{}{})", left, op, right),
        }
    }
}

fn leaf(formula: &str, token: &str, depth: usize) -> Result<Rc<Node>> {
    if is_atom(token) || is_constant(token) {
        Ok(Node::new(NodeKind::Leaf(token.to_string()), depth))
    } else {
        Err(Error::invalid_formula(
            formula,
            format!("unrecognized leaf token `{}`", token),
        ))
    }
}

/// Builds the AST of `formula`, rooted at `depth`.
///
/// Returns the root together with the maximal depth of any node below it.
pub fn build_ast(formula: &str, depth: usize) -> Result<(Rc<Node>, usize)> {
    let split = subdivide(formula)?;
    trace!("build_ast(depth = {}): {:?}", depth, split);

    match split {
        Split::Leaf(token) => Ok((leaf(formula, token, depth)?, depth)),
        Split::Unary(op, operand) => {
            let (child, max_depth) = build_ast(operand, depth + 1)?;
            Ok((Node::new(NodeKind::Unary(op, child), depth), max_depth))
        }
        Split::Binary(op, left, right) => {
            let (left, left_depth) = build_ast(left, depth + 1)?;
            let (right, right_depth) = build_ast(right, depth + 1)?;
            let root = Node::new(NodeKind::Binary(op, left, right), depth);
            Ok((root, left_depth.max(right_depth)))
        }
    }
}

/// Parses `formula` into an AST rooted at depth 0.
pub fn parse(formula: &str) -> Result<Rc<Node>> {
    build_ast(formula, 0).map(|(root, _)| root)
}

/// Memoization table for [`build_ast_cached`], keyed by exact subformula text.
///
/// Create a fresh cache per top-level construction: a node stored here keeps
/// the depth it was first built at. Only its height below that depth is used
/// to report the maximal depth of later occurrences.
#[derive(Debug, Default)]
pub struct SubformulaCache {
    entries: HashMap<String, (Rc<Node>, usize)>, // node, height
    hits: usize,
    misses: usize,
}

impl SubformulaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct subformulas stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Reset the cache.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn get(&mut self, formula: &str, depth: usize) -> Option<(Rc<Node>, usize)> {
        match self.entries.get(formula) {
            Some((node, height)) => {
                self.hits += 1;
                Some((Rc::clone(node), depth + height))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn insert(&mut self, formula: &str, node: Rc<Node>, height: usize) {
        if let Entry::Vacant(entry) = self.entries.entry(formula.to_string()) {
            entry.insert((node, height));
        }
    }
}

/// Same as [`build_ast`], but every subformula is looked up in `cache` first.
///
/// Identical subformulas (by exact string) resolve to the same shared node.
pub fn build_ast_cached(
    formula: &str,
    cache: &mut SubformulaCache,
    depth: usize,
) -> Result<(Rc<Node>, usize)> {
    let formula = formula.trim();
    if let Some(hit) = cache.get(formula, depth) {
        return Ok(hit);
    }

    let (root, max_depth) = match subdivide(formula)? {
        Split::Leaf(token) => (leaf(formula, token, depth)?, depth),
        Split::Unary(op, operand) => {
            let (child, max_depth) = build_ast_cached(operand, cache, depth + 1)?;
            (Node::new(NodeKind::Unary(op, child), depth), max_depth)
        }
        Split::Binary(op, left, right) => {
            let (left, left_depth) = build_ast_cached(left, cache, depth + 1)?;
            let (right, right_depth) = build_ast_cached(right, cache, depth + 1)?;
            let root = Node::new(NodeKind::Binary(op, left, right), depth);
            (root, left_depth.max(right_depth))
        }
    };

    cache.insert(formula, Rc::clone(&root), max_depth - depth);
    Ok((root, max_depth))
}

/// Breadth-first list of `(label, depth)` pairs, left child before right.
pub fn level_order(root: &Node) -> Vec<(String, usize)> {
    let mut result = Vec::new();
    let mut queue: VecDeque<&Node> = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        result.push((node.label(), node.depth));
        if let Some(left) = node.left() {
            queue.push_back(left);
        }
        if let Some(right) = node.right() {
            queue.push_back(right);
        }
    }
    result
}
