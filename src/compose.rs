//! Composition of per-neuron terms into one term for the whole network.
//!
//! Every neuron term is written over the atoms `x1, x2, ...`, naming the
//! outputs of the previous layer (or the network inputs, for the first layer).
//! Composition replaces those atoms, layer by layer, with the terms of the
//! neurons they refer to.

use std::collections::HashMap;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::network::Network;
use crate::synthesis::{synthesize, Strategy};

/// Terms indexed by layer, then neuron: neuron `i` of a layer (0-indexed) is the
/// atom `x{i+1}` of the next layer.
pub type MvTerms = Vec<Vec<String>>;

/// Synthesizes the term of every neuron of `net`.
pub fn construct_mv_terms<N: Network + ?Sized>(net: &N, strategy: Strategy) -> Result<MvTerms> {
    (0..net.num_layers())
        .map(|layer| {
            (0..net.num_neurons(layer))
                .map(|neuron| {
                    let term = synthesize(net.weights(layer, neuron), net.bias(layer, neuron), strategy)?;
                    debug!("layer {} neuron {}: term of size {}", layer, neuron + 1, term.size());
                    Ok(term.to_string())
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

/// [`construct_mv_terms`] with [`Strategy::FromPaper`].
pub fn construct_mv_terms_from_paper<N: Network + ?Sized>(net: &N) -> Result<MvTerms> {
    construct_mv_terms(net, Strategy::FromPaper)
}

/// Replaces whole atom tokens of `term` according to `replacements`.
///
/// An atom token is an ASCII letter followed by all of its digits, so `x1`
/// never matches inside `x10`. The `k` of `δ_k` and the constants are not
/// atom tokens and are copied unchanged.
pub fn substitute(term: &str, replacements: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(term.len());
    let mut chars = term.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !c.is_ascii_alphabetic() {
            result.push(c);
            continue;
        }
        let mut end = start + 1;
        while let Some(&(i, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            end = i + 1;
            chars.next();
        }
        let token = &term[start..end];
        result.push_str(replacements.get(token).map_or(token, String::as_str));
    }
    result
}

/// Composes per-neuron terms into the term of the (single) network output.
///
/// For every layer after the first, each neuron term has its atoms renamed
/// `x{i} → s{i}` and then `s{i}` replaced by the term of neuron `i` of the
/// previous layer, so no inserted term is rewritten again.
pub fn compose_mv_terms<N: Network + ?Sized>(net: &N, mut terms: MvTerms) -> Result<String> {
    if net.num_layers() == 0 {
        return Err(Error::InvalidNetwork("network has no layers".to_string()));
    }
    if terms.len() != net.num_layers() {
        return Err(Error::InvalidNetwork(format!(
            "{} term layers for {} network layers",
            terms.len(),
            net.num_layers()
        )));
    }
    for (layer, layer_terms) in terms.iter().enumerate() {
        if layer_terms.len() != net.num_neurons(layer) {
            return Err(Error::InvalidNetwork(format!(
                "layer {} has {} terms for {} neurons",
                layer,
                layer_terms.len(),
                net.num_neurons(layer)
            )));
        }
    }

    for layer in 1..net.num_layers() {
        let inputs = net.num_inputs(layer);
        if inputs != terms[layer - 1].len() {
            return Err(Error::InvalidNetwork(format!(
                "layer {} has {} inputs, but the previous layer has {} neurons",
                layer,
                inputs,
                terms[layer - 1].len()
            )));
        }

        let placeholders: HashMap<String, String> =
            (1..=inputs).map(|v| (format!("x{}", v), format!("s{}", v))).collect();
        let upstream: HashMap<String, String> = terms[layer - 1]
            .iter()
            .enumerate()
            .map(|(i, term)| (format!("s{}", i + 1), term.clone()))
            .collect();

        for term in terms[layer].iter_mut() {
            *term = substitute(&substitute(term, &placeholders), &upstream);
        }
        debug!(
            "composed layer {}: term lengths {:?}",
            layer,
            terms[layer].iter().map(String::len).collect::<Vec<_>>()
        );
    }

    let mut output = terms.pop().unwrap_or_default();
    if output.len() != 1 {
        return Err(Error::InvalidNetwork(format!(
            "output layer has {} neurons, expected 1",
            output.len()
        )));
    }
    let term = output.swap_remove(0);
    info!("network term has {} characters", term.chars().count());
    Ok(term)
}

/// Synthesizes and composes the term of the whole network.
pub fn network_term<N: Network + ?Sized>(net: &N, strategy: Strategy) -> Result<String> {
    let terms = construct_mv_terms(net, strategy)?;
    compose_mv_terms(net, terms)
}
