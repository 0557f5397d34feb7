//! Vault configuration loaded from environment variables.
//!
//! Every setting has a default so the vault runs offline with zero
//! configuration; without an API key, content analysis degrades to
//! placeholder results.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use docvault_shared::constants::{DEFAULT_LOGIN_DELAY_MS, DEFAULT_UPLOAD_DELAY_MS, STORAGE_KEY};
use docvault_store::{Database, SqliteSnapshotStore, StoreError};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Vault configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Credential for the content-analysis service.
    /// Env: `API_KEY`, then `GEMINI_API_KEY`
    /// Default: none (offline)
    pub api_key: Option<String>,

    /// Env: `GEMINI_MODEL`
    pub model: String,

    /// Base URL of the content-analysis service.
    /// Env: `GEMINI_ENDPOINT`
    pub endpoint: String,

    /// Request timeout for content analysis. `None` waits indefinitely.
    /// Env: `DOCVAULT_ANALYSIS_TIMEOUT_SECS`
    pub analysis_timeout: Option<Duration>,

    /// Simulated sign-in latency.
    /// Env: `DOCVAULT_LOGIN_DELAY_MS`
    /// Default: 2000 ms
    pub login_delay: Duration,

    /// Simulated upload latency.
    /// Env: `DOCVAULT_UPLOAD_DELAY_MS`
    /// Default: 1500 ms
    pub upload_delay: Duration,

    /// Key the snapshot is stored under.
    /// Env: `DOCVAULT_STORAGE_KEY`
    pub storage_key: String,

    /// SQLite file holding snapshots.
    /// Env: `DOCVAULT_DB_PATH`
    /// Default: the platform data directory
    pub db_path: Option<PathBuf>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            analysis_timeout: None,
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            upload_delay: Duration::from_millis(DEFAULT_UPLOAD_DELAY_MS),
            storage_key: STORAGE_KEY.to_string(),
            db_path: None,
        }
    }
}

impl fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("analysis_timeout", &self.analysis_timeout)
            .field("login_delay", &self.login_delay)
            .field("upload_delay", &self.upload_delay)
            .field("storage_key", &self.storage_key)
            .field("db_path", &self.db_path)
            .finish()
    }
}

impl VaultConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with no simulated latency.
    pub fn instant() -> Self {
        Self {
            login_delay: Duration::ZERO,
            upload_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = lookup("API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            config.model = model;
        }

        if let Some(endpoint) = lookup("GEMINI_ENDPOINT") {
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }

        if let Some(secs) = parse_u64(&lookup, "DOCVAULT_ANALYSIS_TIMEOUT_SECS") {
            config.analysis_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(ms) = parse_u64(&lookup, "DOCVAULT_LOGIN_DELAY_MS") {
            config.login_delay = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_u64(&lookup, "DOCVAULT_UPLOAD_DELAY_MS") {
            config.upload_delay = Duration::from_millis(ms);
        }

        if let Some(key) = lookup("DOCVAULT_STORAGE_KEY") {
            if !key.is_empty() {
                config.storage_key = key;
            }
        }

        if let Some(path) = lookup("DOCVAULT_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Open the SQLite snapshot store this configuration points at.
    pub fn open_store(&self) -> Result<SqliteSnapshotStore, StoreError> {
        let db = match &self.db_path {
            Some(path) => Database::open_at(path)?,
            None => Database::new()?,
        };
        Ok(SqliteSnapshotStore::with_key(db, self.storage_key.clone()))
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u64> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "invalid number, using default");
            None
        }
    }
}
