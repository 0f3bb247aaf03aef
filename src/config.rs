use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::audit::{DEFAULT_MAX_BACKUPS, DEFAULT_MAX_BYTES};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// REST base for production order entry
    #[serde(default = "default_rest_url")]
    pub rest_url: String,
    /// REST base used when --testnet is passed
    #[serde(default = "default_testnet_rest_url")]
    pub testnet_rest_url: String,
    /// API key; falls back to the BINANCE_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret; falls back to the BINANCE_API_SECRET environment variable
    #[serde(default)]
    pub api_secret: Option<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            testnet_rest_url: default_testnet_rest_url(),
            api_key: None,
            api_secret: None,
        }
    }
}

impl ExchangeConfig {
    /// Resolve the credential pair from config values or the environment.
    /// `None` unless both halves are present.
    pub fn credentials(&self) -> Option<(String, String)> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("BINANCE_API_KEY").ok())?;
        let api_secret = self
            .api_secret
            .clone()
            .or_else(|| std::env::var("BINANCE_API_SECRET").ok())?;
        Some((api_key, api_secret))
    }

    pub fn rest_base(&self, testnet: bool) -> &str {
        if testnet {
            &self.testnet_rest_url
        } else {
            &self.rest_url
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Path of the JSON-lines audit log
    #[serde(default = "default_log_path")]
    pub log_path: String,
    /// Rotation cap in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// Rotated generations to keep
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            max_bytes: default_max_bytes(),
            max_backups: default_max_backups(),
        }
    }
}

fn default_rest_url() -> String {
    "https://fapi.binance.com".to_string()
}

fn default_testnet_rest_url() -> String {
    "https://testnet.binancefuture.com".to_string()
}

fn default_log_path() -> String {
    "bot.log".to_string()
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

fn default_max_backups() -> u32 {
    DEFAULT_MAX_BACKUPS
}

impl AppConfig {
    /// Load configuration from an optional TOML file layered under
    /// environment variables (FUTCTL_EXCHANGE__REST_URL, etc.). A missing
    /// file means pure defaults, never an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref().to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("FUTCTL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
