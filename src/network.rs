//! Clipped-ReLU networks with rational weights.
//!
//! Synthesis only needs per-neuron weights and biases, which it reads through
//! the [`Network`] trait. [`CReluNetwork`] is a plain in-memory implementation
//! that can also evaluate itself numerically.

use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::error::{Error, Result};
use crate::synthesis::sigma_activation;

pub trait Network {
    fn num_layers(&self) -> usize;

    /// Number of neurons (outputs) of `layer`.
    fn num_neurons(&self, layer: usize) -> usize;

    /// Number of inputs of `layer`.
    fn num_inputs(&self, layer: usize) -> usize;

    /// Weight row of `neuron` (0-indexed) in `layer`.
    fn weights(&self, layer: usize, neuron: usize) -> &[BigRational];

    fn bias(&self, layer: usize, neuron: usize) -> &BigRational;
}

/// One fully connected layer followed by the clipped-ReLU activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Vec<Vec<BigRational>>,
    biases: Vec<BigRational>,
}

impl Layer {
    /// Creates a layer from one weight row and one bias per neuron.
    pub fn new(weights: Vec<Vec<BigRational>>, biases: Vec<BigRational>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::InvalidNetwork("layer has no neurons".to_string()));
        }
        if weights.len() != biases.len() {
            return Err(Error::InvalidNetwork(format!(
                "{} weight rows but {} biases",
                weights.len(),
                biases.len()
            )));
        }
        let inputs = weights[0].len();
        if let Some(bad) = weights.iter().position(|row| row.len() != inputs) {
            return Err(Error::InvalidNetwork(format!(
                "weight row {} has {} entries, expected {}",
                bad,
                weights[bad].len(),
                inputs
            )));
        }
        Ok(Self { weights, biases })
    }

    pub fn num_neurons(&self) -> usize {
        self.weights.len()
    }

    pub fn num_inputs(&self) -> usize {
        self.weights[0].len()
    }

    fn forward(&self, inputs: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let dot: f64 = row.iter().zip(inputs).map(|(w, x)| to_f64(w) * x).sum();
                sigma_activation(dot + to_f64(bias))
            })
            .collect()
    }
}

fn to_f64(value: &BigRational) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CReluNetwork {
    layers: Vec<Layer>,
}

impl CReluNetwork {
    /// Creates a network; each layer must consume exactly the outputs of the previous one.
    pub fn new(layers: Vec<Layer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(Error::InvalidNetwork("network has no layers".to_string()));
        }
        for (k, pair) in layers.windows(2).enumerate() {
            if pair[1].num_inputs() != pair[0].num_neurons() {
                return Err(Error::InvalidNetwork(format!(
                    "layer {} expects {} inputs, but layer {} has {} neurons",
                    k + 1,
                    pair[1].num_inputs(),
                    k,
                    pair[0].num_neurons()
                )));
            }
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Direct numeric evaluation of all layers.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not match the width of the first layer.
    pub fn forward(&self, inputs: &[f64]) -> Vec<f64> {
        assert_eq!(
            inputs.len(),
            self.layers[0].num_inputs(),
            "Input length should match the first layer"
        );
        self.layers
            .iter()
            .fold(inputs.to_vec(), |values, layer| layer.forward(&values))
    }
}

impl Network for CReluNetwork {
    fn num_layers(&self) -> usize {
        self.layers.len()
    }

    fn num_neurons(&self, layer: usize) -> usize {
        self.layers[layer].num_neurons()
    }

    fn num_inputs(&self, layer: usize) -> usize {
        self.layers[layer].num_inputs()
    }

    fn weights(&self, layer: usize, neuron: usize) -> &[BigRational] {
        &self.layers[layer].weights[neuron]
    }

    fn bias(&self, layer: usize, neuron: usize) -> &BigRational {
        &self.layers[layer].biases[neuron]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rational::ratio;

    fn layer(rows: &[&[(i64, i64)]], biases: &[(i64, i64)]) -> Layer {
        let weights = rows
            .iter()
            .map(|row| row.iter().map(|&(n, d)| ratio(n, d)).collect())
            .collect();
        let biases = biases.iter().map(|&(n, d)| ratio(n, d)).collect();
        Layer::new(weights, biases).unwrap()
    }

    #[test]
    fn test_layer_shape_errors() {
        assert!(Layer::new(vec![], vec![]).is_err());
        assert!(Layer::new(vec![vec![ratio(1, 1)]], vec![]).is_err());
        let ragged = vec![vec![ratio(1, 1)], vec![ratio(1, 1), ratio(1, 1)]];
        assert!(matches!(
            Layer::new(ragged, vec![ratio(0, 1), ratio(0, 1)]),
            Err(Error::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_network_shape_errors() {
        assert!(CReluNetwork::new(vec![]).is_err());
        let hidden = layer(&[&[(1, 1)], &[(1, 1)]], &[(0, 1), (0, 1)]);
        let output = layer(&[&[(1, 1), (1, 1), (1, 1)]], &[(0, 1)]);
        assert!(CReluNetwork::new(vec![hidden, output]).is_err());
    }

    #[test]
    fn test_accessors() {
        let hidden = layer(&[&[(1, 2), (1, 2)], &[(1, 1), (-1, 1)]], &[(0, 1), (1, 2)]);
        let output = layer(&[&[(1, 1), (1, 1)]], &[(-1, 2)]);
        let net = CReluNetwork::new(vec![hidden, output]).unwrap();
        assert_eq!(net.num_layers(), 2);
        assert_eq!(net.num_neurons(0), 2);
        assert_eq!(net.num_inputs(0), 2);
        assert_eq!(net.num_neurons(1), 1);
        assert_eq!(net.weights(0, 1), &[ratio(1, 1), ratio(-1, 1)]);
        assert_eq!(net.bias(1, 0), &ratio(-1, 2));
    }

    #[test]
    fn test_forward() {
        let hidden = layer(&[&[(1, 2), (1, 2)], &[(1, 1), (-1, 1)]], &[(0, 1), (1, 2)]);
        let output = layer(&[&[(1, 1), (1, 1)]], &[(-1, 2)]);
        let net = CReluNetwork::new(vec![hidden, output]).unwrap();
        // hidden = [0.5, 1.0] (second clipped), output = σ(1.5 - 0.5) = 1.
        assert_eq!(net.forward(&[1.0, 0.0]), vec![1.0]);
        // hidden = [0.1, 0.7], output = σ(0.8 - 0.5) = 0.3.
        let out = net.forward(&[0.2, 0.0]);
        assert!((out[0] - 0.3).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "Input length should match the first layer")]
    fn test_forward_wrong_width() {
        let net = CReluNetwork::new(vec![layer(&[&[(1, 1)]], &[(0, 1)])]).unwrap();
        net.forward(&[0.1, 0.2]);
    }
}
