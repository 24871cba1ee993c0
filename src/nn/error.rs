//! Errors produced when building or evaluating networks.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by the nn module.
///
/// # Variants
///
/// - **InputSize**: The number of inputs does not match a neuron's fan-in.
///   *When*: [`Neuron::evaluate`](super::Neuron::evaluate), [`Layer::evaluate`](super::Layer::evaluate),
///   or [`Layer::from_neurons`](super::Layer::from_neurons) with neurons of differing fan-in.
///   *Recovery*: Pass exactly `n_in` inputs.
///
/// - **EmptyLayer** / **EmptyNetwork**: A layer with no neurons or an MLP with no layers was requested.
///   *Recovery*: Request at least one neuron / layer.
///
/// - **Init**: The weight distribution could not be constructed from the config.
///
/// - **Config**: The config failed validation.
#[derive(Debug, Clone, Error)]
pub enum NnError {
    /// Input length differs from the expected fan-in.
    #[error("expected {expected} inputs, got {got}")]
    InputSize {
        /// Fan-in of the neuron or layer.
        expected: usize,
        /// Number of inputs supplied.
        got: usize,
    },

    /// A layer must hold at least one neuron.
    #[error("layer has no neurons")]
    EmptyLayer,

    /// An MLP must hold at least one layer.
    #[error("network has no layers")]
    EmptyNetwork,

    /// Weight distribution could not be built.
    #[error("weight init: {0}")]
    Init(String),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
