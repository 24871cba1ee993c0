//! Weight initialisation distributions.

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use super::NnError;
use crate::config::{Config, InitScheme};

/// Distribution that weights are sampled from, built from a [`Config`].
#[derive(Clone, Debug)]
pub enum WeightInit {
    /// Uniform on `[low, high)`.
    Uniform(Uniform<f64>),
    /// Gaussian with mean 0.
    Normal(Normal<f64>),
}

impl WeightInit {
    /// Validates `cfg` and builds the distribution it selects.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::Config`] if `cfg` is invalid and [`NnError::Init`] if the
    /// distribution rejects its parameters.
    pub fn from_config(cfg: &Config) -> Result<Self, NnError> {
        cfg.validate()?;
        let init = match cfg.init {
            InitScheme::Uniform => Uniform::new(cfg.init_low, cfg.init_high)
                .map(WeightInit::Uniform)
                .map_err(|e| NnError::Init(e.to_string()))?,
            InitScheme::Normal => Normal::new(0.0, cfg.init_std)
                .map(WeightInit::Normal)
                .map_err(|e| NnError::Init(e.to_string()))?,
        };
        Ok(init)
    }
}

impl Distribution<f64> for WeightInit {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            WeightInit::Uniform(d) => d.sample(rng),
            WeightInit::Normal(d) => d.sample(rng),
        }
    }
}
