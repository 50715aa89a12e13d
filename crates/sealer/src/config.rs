//! Configuration loading and validation for `kbs-seal`.
//!
//! Values are read from `KBS_SEAL_*` environment variables. Every value has a
//! default, and command-line flags override what is configured here.

use anyhow::{Context, Result};
use common::KeyWrapAlgorithm;
use serde::Deserialize;

/// Environment variable prefix, e.g. `KBS_SEAL_DEFAULT_ALG`.
pub const ENV_PREFIX: &str = "KBS_SEAL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Validated `kbs-seal` configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Key-wrap algorithm used when `--alg` is not given.
    #[serde(default = "default_alg")]
    pub default_alg: String,

    /// Tracing log level (e.g. `"warn"`, `"debug"`). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Write envelopes as indented JSON.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_alg() -> String {
    KeyWrapAlgorithm::default().as_str().into()
}
fn default_log_level() -> String {
    "warn".into()
}
fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        self.default_alg
            .parse::<KeyWrapAlgorithm>()
            .with_context(|| format!("{ENV_PREFIX}_DEFAULT_ALG is invalid"))?;

        if self.log_level.trim().is_empty() {
            anyhow::bail!("{ENV_PREFIX}_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_alg: default_alg(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            pretty: default_pretty(),
        }
    }
}
