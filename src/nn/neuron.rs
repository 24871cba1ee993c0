//! A single neuron: `activation(sum_i w_i * x_i + b)`.

use rand::Rng;
use rand_distr::Distribution;

use super::{Activation, Module, NnError, WeightInit};
use crate::autograd::Scalar;
use crate::config::Config;

/// Weights, bias and activation of one neuron. All parameters are leaf [`Scalar`]s.
#[derive(Clone, Debug)]
pub struct Neuron {
    weights: Vec<Scalar>,
    bias: Scalar,
    activation: Activation,
}

impl Neuron {
    /// Creates a neuron with `n_in` weights sampled per `cfg` and bias `cfg.bias_init`.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::Config`] or [`NnError::Init`] if `cfg` cannot produce a distribution.
    pub fn new<R: Rng + ?Sized>(
        n_in: usize,
        activation: Activation,
        cfg: &Config,
        rng: &mut R,
    ) -> Result<Self, NnError> {
        let init = WeightInit::from_config(cfg)?;
        Ok(Self::sampled(n_in, activation, &init, cfg.bias_init, rng))
    }

    pub(crate) fn sampled<R: Rng + ?Sized>(
        n_in: usize,
        activation: Activation,
        init: &WeightInit,
        bias: f64,
        rng: &mut R,
    ) -> Self {
        let weights = (0..n_in).map(|_| Scalar::new(init.sample(&mut *rng))).collect();
        Neuron {
            weights,
            bias: Scalar::new(bias),
            activation,
        }
    }

    /// Builds a neuron from existing parameter handles, e.g. to share a weight between neurons.
    #[must_use]
    pub fn from_parts(weights: Vec<Scalar>, bias: Scalar, activation: Activation) -> Self {
        Neuron {
            weights,
            bias,
            activation,
        }
    }

    /// Number of inputs (weights).
    #[must_use]
    pub fn n_in(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn weights(&self) -> &[Scalar] {
        &self.weights
    }

    #[must_use]
    pub fn bias(&self) -> &Scalar {
        &self.bias
    }

    #[must_use]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Forward pass through the engine's operators.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::InputSize`] if `inputs.len() != self.n_in()`.
    pub fn evaluate(&self, inputs: &[Scalar]) -> Result<Scalar, NnError> {
        if inputs.len() != self.n_in() {
            return Err(NnError::InputSize {
                expected: self.n_in(),
                got: inputs.len(),
            });
        }
        let pre = self
            .weights
            .iter()
            .zip(inputs)
            .fold(self.bias.clone(), |acc, (w, x)| acc + w * x);
        Ok(self.activation.apply(&pre))
    }
}

impl Module for Neuron {
    /// Weights in order, then the bias.
    fn parameters(&self) -> Vec<Scalar> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }
}
