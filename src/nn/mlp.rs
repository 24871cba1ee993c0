//! Multi-layer perceptron: layers applied in sequence, each with its own activation.

use super::{Activation, Layer, Module, NnError, WeightInit};
use crate::autograd::Scalar;
use crate::config::Config;

/// Shape of one MLP layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSpec {
    /// Number of neurons.
    pub n_out: usize,
    /// Activation; `None` uses [`Config::activation`].
    pub activation: Option<Activation>,
}

impl LayerSpec {
    #[must_use]
    pub fn new(n_out: usize, activation: Activation) -> Self {
        LayerSpec {
            n_out,
            activation: Some(activation),
        }
    }

    /// Layer using the config's default activation.
    #[must_use]
    pub fn with_default(n_out: usize) -> Self {
        LayerSpec {
            n_out,
            activation: None,
        }
    }
}

/// Stack of [`Layer`]s; the outputs of one layer are the inputs of the next.
#[derive(Clone, Debug)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Builds layers of the given shapes on top of `n_in` inputs.
    ///
    /// Parameters are drawn from an RNG seeded with `cfg.seed`, so equal configs give
    /// equal networks.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::EmptyNetwork`] for no specs, [`NnError::EmptyLayer`] for a
    /// zero-width layer, or an init error from `cfg`.
    pub fn new(n_in: usize, specs: &[LayerSpec], cfg: &Config) -> Result<Self, NnError> {
        if specs.is_empty() {
            return Err(NnError::EmptyNetwork);
        }
        let init = WeightInit::from_config(cfg)?;
        let mut rng = cfg.rng();
        let mut fan_in = n_in;
        let mut layers = Vec::with_capacity(specs.len());
        for spec in specs {
            let activation = spec.activation.unwrap_or(cfg.activation);
            layers.push(Layer::sampled(
                fan_in,
                spec.n_out,
                activation,
                &init,
                cfg.bias_init,
                &mut rng,
            )?);
            fan_in = spec.n_out;
        }
        let mlp = Mlp { layers };
        log::debug!(
            "mlp: {} layers, {} parameters",
            mlp.layers.len(),
            mlp.parameters().len()
        );
        Ok(mlp)
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Forward pass through every layer.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::InputSize`] if `inputs.len()` differs from the first layer's fan-in.
    pub fn evaluate(&self, inputs: &[Scalar]) -> Result<Vec<Scalar>, NnError> {
        let mut acts = inputs.to_vec();
        for layer in &self.layers {
            acts = layer.evaluate(&acts)?;
        }
        Ok(acts)
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Scalar> {
        self.layers.iter().flat_map(Module::parameters).collect()
    }
}
