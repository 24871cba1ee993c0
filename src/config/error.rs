//! Errors from loading and checking initialisation settings.

use thiserror::Error;

/// Why a [`Config`](super::Config) could not be loaded or used.
///
/// [`ConfigError::message`] gives the bare reason without the key, for short log lines.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A value is out of range, e.g. `init_low >= init_high` or a non-finite `bias_init`.
    /// Returned by [`Config::validate`](super::Config::validate).
    #[error("config validation: {0}")]
    Validation(String),

    /// A `PICOGRAD_*` variable holds bytes that are not Unicode.
    #[error("env var {key}: {message}")]
    EnvVar {
        key: String,
        message: String,
    },

    /// A `PICOGRAD_*` variable is set to something its field cannot hold
    /// (`PICOGRAD_SEED=abc`, `PICOGRAD_ACTIVATION=tanh`). Unset it to get the default.
    #[error("env var {key}={value:?}: {message}")]
    Parse {
        key: String,
        /// Text as read from the environment.
        value: String,
        message: String,
    },
}

impl ConfigError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ConfigError::Validation(m)
            | ConfigError::EnvVar { message: m, .. }
            | ConfigError::Parse { message: m, .. } => m,
        }
    }
}
