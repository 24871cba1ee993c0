//! # picograd
//!
//! Minimal reverse-mode automatic differentiation over scalar values, with a thin
//! neuron / layer / MLP layer built on top.
//!
//! - [`autograd`]: the [`Scalar`] graph node, its operators, and the backward pass.
//! - [`nn`]: [`Neuron`], [`Layer`] and [`Mlp`] composed purely from engine operators.
//! - [`config`]: initialisation settings, loadable from `PICOGRAD_*` environment variables.
//!
//! ```
//! use picograd::{Scalar, ScalarNode};
//!
//! let x = Scalar::new(-1.0);
//! let y = Scalar::new(2.0);
//! let z = (&x * &y + &x).relu();
//! z.backward();
//! assert_eq!(z.data(), 0.0);
//! assert_eq!(x.grad(), 0.0);
//! ```

pub mod autograd;
pub mod config;
pub mod nn;

pub use autograd::{Exp, GradError, Op, Pow, Scalar, ScalarNode, Sin};
pub use config::{Config, ConfigError, InitScheme};
pub use nn::{Activation, Layer, LayerSpec, Mlp, Module, Neuron, NnError};
