//! Reads `PICOGRAD_*` environment variables into a [`Config`].
//!
//! Key suffixes and defaults live in the `constants` submodule; every variable is
//! optional and falls back to [`Config::default`].

use std::env::VarError;

use super::constants::{
    ENV_ACTIVATION, ENV_BIAS_INIT, ENV_INIT, ENV_INIT_HIGH, ENV_INIT_LOW, ENV_INIT_STD,
    ENV_PREFIX, ENV_SEED,
};
use super::{Config, ConfigError, InitScheme};
use crate::nn::Activation;

/// `env_key("INIT_STD")` is `PICOGRAD_INIT_STD`.
#[must_use]
pub fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

/// Raw value of `key`, or `None` when it is not set.
///
/// # Errors
///
/// [`ConfigError::EnvVar`] when the value is not valid Unicode.
pub fn env_string(key: &str) -> Result<Option<String>, ConfigError> {
    std::env::var(key).map(Some).or_else(|e| match e {
        VarError::NotPresent => Ok(None),
        other => Err(ConfigError::EnvVar {
            key: key.to_string(),
            message: other.to_string(),
        }),
    })
}

/// Value of `key` parsed as `T` (surrounding whitespace ignored), or `None` when unset.
///
/// # Errors
///
/// [`ConfigError::Parse`] when the value does not parse, e.g. `PICOGRAD_INIT=xavier`.
pub fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = env_string(key)? else {
        return Ok(None);
    };
    raw.trim().parse::<T>().map(Some).map_err(|e: T::Err| ConfigError::Parse {
        key: key.to_string(),
        message: e.to_string(),
        value: raw.clone(),
    })
}

/// Builds [`Config`] from environment variables, falling back to [`Config::default`] for unset values.
///
/// Returns [`ConfigError`] if any *set* variable fails to parse (e.g. `PICOGRAD_SEED=abc`).
/// The result is not validated; call [`Config::validate`] before use.
pub fn from_env() -> Result<Config, ConfigError> {
    let default = Config::default();

    let seed = env_parsed::<u64>(&env_key(ENV_SEED))?.unwrap_or(default.seed);
    let init = env_parsed::<InitScheme>(&env_key(ENV_INIT))?.unwrap_or(default.init);
    let init_low = env_parsed::<f64>(&env_key(ENV_INIT_LOW))?.unwrap_or(default.init_low);
    let init_high = env_parsed::<f64>(&env_key(ENV_INIT_HIGH))?.unwrap_or(default.init_high);
    let init_std = env_parsed::<f64>(&env_key(ENV_INIT_STD))?.unwrap_or(default.init_std);
    let bias_init = env_parsed::<f64>(&env_key(ENV_BIAS_INIT))?.unwrap_or(default.bias_init);
    let activation =
        env_parsed::<Activation>(&env_key(ENV_ACTIVATION))?.unwrap_or(default.activation);

    let cfg = Config {
        seed,
        init,
        init_low,
        init_high,
        init_std,
        bias_init,
        activation,
    };
    log::debug!("config from env: {cfg:?}");
    Ok(cfg)
}
