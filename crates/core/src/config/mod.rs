//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GNDCACHE_*)
//! 2. TOML config file (if GNDCACHE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GNDCACHE_*)
/// 2. TOML config file (if GNDCACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database file.
    ///
    /// Set via GNDCACHE_DB_PATH environment variable. Required; startup
    /// fails without it.
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// host:port the HTTP server listens on.
    ///
    /// Set via GNDCACHE_LISTEN_ADDR environment variable.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Base URL of the upstream GND registry.
    ///
    /// Set via GNDCACHE_UPSTREAM_BASE_URL environment variable. The
    /// per-identifier document is fetched from
    /// `{upstream_base_url}/gnd/{id}/about/rdf`.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// User-Agent string for outbound requests.
    ///
    /// Set via GNDCACHE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Outbound request timeout in milliseconds.
    ///
    /// Set via GNDCACHE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_listen_addr() -> String {
    "127.0.0.1:5000".into()
}

fn default_upstream_base_url() -> String {
    "http://d-nb.info".into()
}

fn default_user_agent() -> String {
    concat!("gndcache/", env!("CARGO_PKG_VERSION")).into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            listen_addr: default_listen_addr(),
            upstream_base_url: default_upstream_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GNDCACHE_`
    /// 2. TOML file from `GNDCACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GNDCACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GNDCACHE_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// The database path, which has no default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no path was configured.
    pub fn require_db_path(&self) -> Result<&Path, ConfigError> {
        self.db_path.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "db_path".into(),
            hint: "Set GNDCACHE_DB_PATH environment variable".into(),
        })
    }
}
