//! # cur-config
//!
//! Layered configuration loading for Curator using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CURATOR_*` prefix, `__` as separator)
//! 2. Project-level `.curator/config.toml`
//! 3. User-level `~/.config/curator/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CURATOR_LLM__API_KEY` -> `llm.api_key`,
//! `CURATOR_GITHUB__TOKEN` -> `github.token`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use cur_config::CuratorConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = CuratorConfig::load_with_dotenv().expect("config");
//!
//! if config.llm.is_configured() {
//!     println!("provider: {}", config.llm.provider);
//! }
//! ```

mod catalog;
mod error;
mod general;
mod generation;
mod github;
mod llm;

pub use catalog::{default_aws_services, default_categories};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use generation::GenerationConfig;
pub use github::GithubConfig;
pub use llm::{LlmConfig, ProviderKind};

use cur_core::{AwsService, Category};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CuratorConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    /// Category catalog used to bias idea sampling.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    /// AWS service catalog used to pick services per idea.
    #[serde(default = "default_aws_services")]
    pub aws_services: Vec<AwsService>,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            github: GithubConfig::default(),
            generation: GenerationConfig::default(),
            general: GeneralConfig::default(),
            categories: default_categories(),
            aws_services: default_aws_services(),
        }
    }
}

impl CuratorConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if figment extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` for the nearest `.env` file before building the
    /// figment. This is the typical entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if figment extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".curator/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("CURATOR_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("curator").join("config.toml"))
    }
}
