//! Neurons, layers and MLPs composed from the autograd engine.
//!
//! This module defines the **trait** ([`Module`]), the [`Activation`] choice, and the
//! composite types ([`Neuron`], [`Layer`], [`Mlp`]). Every forward pass is built from
//! [`Scalar`] operators only, so a single backward pass from a loss reaches every parameter.

mod error;
mod init;
mod layer;
mod mlp;
mod neuron;

use std::fmt;
use std::str::FromStr;

use crate::autograd::{Scalar, ScalarNode, Sin};

pub use error::NnError;
pub use init::WeightInit;
pub use layer::Layer;
pub use mlp::{LayerSpec, Mlp};
pub use neuron::Neuron;

/// Anything that owns trainable [`Scalar`] parameters.
pub trait Module {
    /// All parameters in a stable order (for zeroing gradients and optimizer access).
    fn parameters(&self) -> Vec<Scalar>;

    /// Sets every parameter's gradient to 0.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }
}

/// Nonlinearity applied to a neuron's pre-activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    #[default]
    Relu,
    Sigmoid,
    /// Identity.
    Linear,
    Sin,
}

impl Activation {
    /// Applies the activation as a new graph node.
    #[must_use]
    pub fn apply(self, x: &Scalar) -> Scalar {
        match self {
            Activation::Relu => x.relu(),
            Activation::Sigmoid => x.sigmoid(),
            Activation::Linear => x.linear(),
            Activation::Sin => x.sin(),
        }
    }
}

impl FromStr for Activation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relu" => Ok(Activation::Relu),
            "sigmoid" => Ok(Activation::Sigmoid),
            "linear" | "identity" => Ok(Activation::Linear),
            "sin" => Ok(Activation::Sin),
            other => Err(format!("unknown activation {other:?}")),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Relu => write!(f, "relu"),
            Activation::Sigmoid => write!(f, "sigmoid"),
            Activation::Linear => write!(f, "linear"),
            Activation::Sin => write!(f, "sin"),
        }
    }
}
