//! # Configuration
//!
//! Layered configuration resolved with Figment:
//!
//! 1. Built-in defaults
//! 2. TOML file (explicit path, else `./boq.toml` if it exists)
//! 3. Environment variables with the `BOQ_` prefix
//!    (`BOQ_GENERATOR__MODEL` -> `generator.model`)
//!
//! ## Example
//!
//! ```toml
//! [generator]
//! provider = "ollama"
//! model = "llama3:latest"
//! timeout_secs = 300
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "boq.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BOQ_";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
}

/// Text-generation provider settings.
///
/// The API key is never serialized and is redacted from debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Provider type: "openai" or "ollama"
    pub provider: String,
    /// Model name (provider-specific); provider default when unset
    pub model: Option<String>,
    /// API base URL; provider default when unset
    pub api_base: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            provider: "openai".to_string(),
            model: None,
            api_base: None,
            api_key: None,
            timeout_secs: 120,
            temperature: 0.2,
            max_tokens: 4096,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> CalcResult<()> {
        if self.timeout_secs == 0 {
            return Err(CalcError::config("generator.timeout_secs must be greater than 0"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CalcError::config(format!(
                "generator.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(CalcError::config("generator.max_tokens must be greater than 0"));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration: defaults -> file -> `BOQ_*` environment.
    ///
    /// An explicit `path` must exist; the implicit `./boq.toml` is optional.
    pub fn load(path: Option<&Path>) -> CalcResult<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CalcError::config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                debug!("Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
                if implicit.exists() {
                    debug!("Loading config from: {}", implicit.display());
                    figment = figment.merge(Toml::file(implicit));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(figment)
    }

    /// Load configuration from a specific file only (no environment).
    pub fn load_from_file(path: &Path) -> CalcResult<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> CalcResult<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| CalcError::config(e.to_string()))?;
        config.generator.validate()?;
        Ok(config)
    }
}
