//! Central place for all configuration constants.
//!
//! Default values and environment variable key names used by the config builder.

/// Environment variable prefix (e.g. `PICOGRAD_SEED`).
pub(crate) const ENV_PREFIX: &str = "PICOGRAD_";

// --- Env key suffixes (full key = ENV_PREFIX + suffix) ---

pub(crate) const ENV_SEED: &str = "SEED";
pub(crate) const ENV_INIT: &str = "INIT";
pub(crate) const ENV_INIT_LOW: &str = "INIT_LOW";
pub(crate) const ENV_INIT_HIGH: &str = "INIT_HIGH";
pub(crate) const ENV_INIT_STD: &str = "INIT_STD";
pub(crate) const ENV_BIAS_INIT: &str = "BIAS_INIT";
pub(crate) const ENV_ACTIVATION: &str = "ACTIVATION";

// --- Default values ---

pub(crate) const DEFAULT_SEED: u64 = 42;
pub(crate) const DEFAULT_INIT_LOW: f64 = -1.0;
pub(crate) const DEFAULT_INIT_HIGH: f64 = 1.0;
pub(crate) const DEFAULT_INIT_STD: f64 = 0.08;
pub(crate) const DEFAULT_BIAS_INIT: f64 = 0.0;
