//! A layer of neurons sharing the same inputs.

use rand::Rng;

use super::{Activation, Module, NnError, Neuron, WeightInit};
use crate::autograd::Scalar;
use crate::config::Config;

/// Ordered neurons with a common fan-in; produces one output per neuron.
#[derive(Clone, Debug)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates `n_out` neurons with `n_in` inputs each, all using `activation`.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::EmptyLayer`] if `n_out == 0`, or an init error from `cfg`.
    pub fn new<R: Rng + ?Sized>(
        n_in: usize,
        n_out: usize,
        activation: Activation,
        cfg: &Config,
        rng: &mut R,
    ) -> Result<Self, NnError> {
        let init = WeightInit::from_config(cfg)?;
        Self::sampled(n_in, n_out, activation, &init, cfg.bias_init, rng)
    }

    pub(crate) fn sampled<R: Rng + ?Sized>(
        n_in: usize,
        n_out: usize,
        activation: Activation,
        init: &WeightInit,
        bias: f64,
        rng: &mut R,
    ) -> Result<Self, NnError> {
        if n_out == 0 {
            return Err(NnError::EmptyLayer);
        }
        let neurons = (0..n_out)
            .map(|_| Neuron::sampled(n_in, activation, init, bias, &mut *rng))
            .collect();
        log::debug!("layer: {n_in} -> {n_out} ({activation})");
        Ok(Layer { neurons })
    }

    /// Wraps existing neurons.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::EmptyLayer`] for no neurons and [`NnError::InputSize`] if the
    /// neurons disagree on fan-in.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Result<Self, NnError> {
        let first = neurons.first().ok_or(NnError::EmptyLayer)?;
        let expected = first.n_in();
        if let Some(odd) = neurons.iter().find(|n| n.n_in() != expected) {
            return Err(NnError::InputSize {
                expected,
                got: odd.n_in(),
            });
        }
        Ok(Layer { neurons })
    }

    #[must_use]
    pub fn n_in(&self) -> usize {
        self.neurons.first().map_or(0, Neuron::n_in)
    }

    #[must_use]
    pub fn n_out(&self) -> usize {
        self.neurons.len()
    }

    #[must_use]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// One output per neuron, in neuron order.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::InputSize`] if `inputs.len() != self.n_in()`.
    pub fn evaluate(&self, inputs: &[Scalar]) -> Result<Vec<Scalar>, NnError> {
        self.neurons.iter().map(|n| n.evaluate(inputs)).collect()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Scalar> {
        self.neurons.iter().flat_map(Module::parameters).collect()
    }
}
