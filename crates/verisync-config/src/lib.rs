//! # verisync-config
//!
//! Layered configuration loading for verisync using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VERISYNC_*` prefix, `__` as separator)
//! 2. Project-level `.verisync/config.toml`
//! 3. User-level `~/.config/verisync/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VERISYNC_REGISTRY__TIMEOUT_SECS` -> `registry.timeout_secs`,
//! `VERISYNC_RECONCILE__RECHECK_AFTER_DAYS` -> `reconcile.recheck_after_days`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use verisync_config::VerisyncConfig;
//!
//! let config = VerisyncConfig::load_with_dotenv().expect("config");
//! println!("registry: {}", config.registry.verification_url);
//! ```

mod error;
mod general;
mod reconcile;
mod registry;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use reconcile::ReconcileConfig;
pub use registry::RegistryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Accepted per-request timeout range for registry calls.
const MIN_TIMEOUT_SECS: u64 = 8;
const MAX_TIMEOUT_SECS: u64 = 10;

/// Longest recheck window, about ten years.
const MAX_RECHECK_AFTER_DAYS: u32 = 3650;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VerisyncConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl VerisyncConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".verisync/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VERISYNC_").split("__"))
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.registry.timeout_secs) {
            return Err(ConfigError::InvalidValue {
                field: "registry.timeout_secs".into(),
                reason: format!("must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS}"),
            });
        }
        if self.reconcile.recheck_after_days > MAX_RECHECK_AFTER_DAYS {
            return Err(ConfigError::InvalidValue {
                field: "reconcile.recheck_after_days".into(),
                reason: format!("must be at most {MAX_RECHECK_AFTER_DAYS}"),
            });
        }
        if self.reconcile.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reconcile.batch_size".into(),
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("verisync").join("config.toml"))
    }
}
