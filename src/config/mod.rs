//! Configuration for parameter initialisation of networks built on the engine.
//!
//! Load from environment via [`from_env`] and validate with [`Config::validate`].
//! Default values and env key names are centralized in the `constants` submodule.

mod builder;
mod constants;
mod error;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use constants::{
    DEFAULT_BIAS_INIT, DEFAULT_INIT_HIGH, DEFAULT_INIT_LOW, DEFAULT_INIT_STD, DEFAULT_SEED,
};

use crate::nn::Activation;

pub use builder::{env_key, env_parsed, env_string, from_env};
pub use error::ConfigError;

/// Distribution weights are drawn from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitScheme {
    /// Uniform on `[init_low, init_high)`.
    #[default]
    Uniform,
    /// Gaussian with mean 0 and standard deviation `init_std`.
    Normal,
}

impl FromStr for InitScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(InitScheme::Uniform),
            "normal" | "gaussian" => Ok(InitScheme::Normal),
            other => Err(format!("unknown init scheme {other:?} (expected uniform or normal)")),
        }
    }
}

impl fmt::Display for InitScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitScheme::Uniform => write!(f, "uniform"),
            InitScheme::Normal => write!(f, "normal"),
        }
    }
}

/// Initialisation settings for neurons, layers and MLPs.
///
/// Use [`from_env`] to build from environment variables and [`Config::validate`] before use.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Seed for the RNG used by [`Mlp::new`](crate::nn::Mlp::new) (reproducibility).
    pub seed: u64,
    /// Weight distribution.
    pub init: InitScheme,
    /// Lower bound for uniform init.
    pub init_low: f64,
    /// Upper bound (exclusive) for uniform init.
    pub init_high: f64,
    /// Standard deviation for normal init.
    pub init_std: f64,
    /// Initial value of every bias.
    pub bias_init: f64,
    /// Activation used when a layer does not name its own.
    pub activation: Activation,
}

impl Default for Config {
    /// Uniform weights in `[-1, 1)`, zero bias, ReLU.
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            init: InitScheme::default(),
            init_low: DEFAULT_INIT_LOW,
            init_high: DEFAULT_INIT_HIGH,
            init_std: DEFAULT_INIT_STD,
            bias_init: DEFAULT_BIAS_INIT,
            activation: Activation::default(),
        }
    }
}

impl Config {
    /// Validates configuration. Returns `Ok(())` if valid, or a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bias_init.is_finite() {
            return Err(ConfigError::Validation("bias_init must be finite".to_string()));
        }
        match self.init {
            InitScheme::Uniform => {
                if !(self.init_low.is_finite() && self.init_high.is_finite()) {
                    return Err(ConfigError::Validation(
                        "init_low and init_high must be finite".to_string(),
                    ));
                }
                if self.init_low >= self.init_high {
                    return Err(ConfigError::Validation(format!(
                        "init_low ({}) must be less than init_high ({})",
                        self.init_low, self.init_high
                    )));
                }
            }
            InitScheme::Normal => {
                if !self.init_std.is_finite() || self.init_std <= 0.0 {
                    return Err(ConfigError::Validation(
                        "init_std must be finite and greater than 0".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Fresh RNG seeded with [`Config::seed`].
    #[must_use]
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}
