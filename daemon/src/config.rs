//! Application configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use veriseal_ledger::{DEFAULT_CONFIRMATION_DELAY, DEFAULT_EXPLORER_URL};
use veriseal_utils::LogFormat;
use veriseal_verification::StepDeadlines;
use veriseal_wallet_core::{DEFAULT_GATEWAY_HOST, DEFAULT_TABLE, DEFAULT_UPLOAD_ENDPOINT};

/// Values shipped in the sample `.env` that must be replaced before use.
const PLACEHOLDER_URL: &str = "your_supabase_url";
const PLACEHOLDER_ANON_KEY: &str = "your_supabase_anon_key";

const REDACTED: &str = "<redacted>";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("{0} still holds the sample placeholder value")]
    Placeholder(&'static str),

    #[error("{key} is not a valid URL: {value:?}")]
    InvalidUrl { key: &'static str, value: String },
}

/// Top-level configuration for the `veriseal` binary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub deadlines: DeadlineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

// ── Sections ──────────────────────────────────────────────────────────

/// Web3.Storage pinning service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_upload_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_gateway_host")]
    pub gateway_host: String,
}

/// Supabase project holding verification rows and sign-in sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    /// Where the OAuth provider sends the browser after sign-in.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_confirmation_delay_ms")]
    pub confirmation_delay_ms: u64,
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
}

/// Per-step deadlines in milliseconds. Zero disables the deadline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeadlineConfig {
    #[serde(default)]
    pub upload_ms: u64,
    #[serde(default)]
    pub register_ms: u64,
    #[serde(default)]
    pub persist_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where `--simulate` keeps pinned payloads and verification rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_upload_endpoint() -> String {
    DEFAULT_UPLOAD_ENDPOINT.to_string()
}

fn default_gateway_host() -> String {
    DEFAULT_GATEWAY_HOST.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_confirmation_delay_ms() -> u64 {
    DEFAULT_CONFIRMATION_DELAY.as_millis() as u64
}

fn default_explorer_url() -> String {
    DEFAULT_EXPLORER_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./veriseal_data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            endpoint: default_upload_endpoint(),
            gateway_host: default_gateway_host(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
            redirect_url: None,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            confirmation_delay_ms: default_confirmation_delay_ms(),
            explorer_url: default_explorer_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

// ── Impl ──────────────────────────────────────────────────────────────

impl AppConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// A copy with credentials masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        mask(&mut copy.storage.token);
        mask(&mut copy.database.anon_key);
        copy
    }

    pub fn step_deadlines(&self) -> StepDeadlines {
        let d = &self.deadlines;
        StepDeadlines::from_millis(d.upload_ms, d.register_ms, d.persist_ms)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.ledger.confirmation_delay_ms)
    }

    /// Check the Supabase settings.
    pub fn validate_database(&self) -> Result<(), ConfigError> {
        let db = &self.database;
        if db.url.trim().is_empty() {
            return Err(ConfigError::Missing("database.url"));
        }
        if db.url == PLACEHOLDER_URL {
            return Err(ConfigError::Placeholder("database.url"));
        }
        if db.anon_key.trim().is_empty() {
            return Err(ConfigError::Missing("database.anon_key"));
        }
        if db.anon_key == PLACEHOLDER_ANON_KEY {
            return Err(ConfigError::Placeholder("database.anon_key"));
        }
        check_url("database.url", &db.url)
    }

    pub fn validate_storage(&self) -> Result<(), ConfigError> {
        if self.storage.token.trim().is_empty() {
            return Err(ConfigError::Missing("storage.token"));
        }
        check_url("storage.endpoint", &self.storage.endpoint)
    }

    /// Everything a verification run needs. Simulated runs touch neither
    /// hosted service.
    pub fn validate(&self, simulate: bool) -> Result<(), ConfigError> {
        if simulate {
            return Ok(());
        }
        self.validate_database()?;
        self.validate_storage()
    }
}

fn mask(secret: &mut String) {
    if !secret.is_empty() {
        *secret = REDACTED.to_string();
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        }),
    }
}
