// src/models/config.rs

//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// CRM API access settings
    #[serde(default)]
    pub crm: CrmConfig,

    /// Pacing and batching behavior
    #[serde(default)]
    pub sync: SyncConfig,

    /// Relational sink settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration or fall back to defaults (plus environment) if
    /// the file is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            let mut config = Self::default();
            config.apply_env();
            config
        })
    }

    /// Override secrets and endpoints from the process environment.
    ///
    /// Credentials are expected to arrive this way rather than in the
    /// TOML file: `GHL_BASE_URL`, `GHL_PRIVATE_TOKEN`, `GHL_LOCATION_ID`,
    /// `DATABASE_URL`.
    pub fn apply_env(&mut self) {
        if let Ok(v) = env::var("GHL_BASE_URL") {
            self.crm.base_url = v;
        }
        if let Ok(v) = env::var("GHL_PRIVATE_TOKEN") {
            self.crm.token = v;
        }
        if let Ok(v) = env::var("GHL_LOCATION_ID") {
            self.crm.location_id = v;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crm.base_url.trim().is_empty() {
            return Err(AppError::validation("crm.base_url is empty"));
        }
        if self.crm.token.trim().is_empty() {
            return Err(AppError::validation("crm.token is empty"));
        }
        if self.crm.location_id.trim().is_empty() {
            return Err(AppError::validation("crm.location_id is empty"));
        }
        if self.crm.api_version.trim().is_empty() {
            return Err(AppError::validation("crm.api_version is empty"));
        }
        if self.crm.timeout_secs == 0 {
            return Err(AppError::validation("crm.timeout_secs must be > 0"));
        }
        if self.sync.page_size == 0 {
            return Err(AppError::validation("sync.page_size must be > 0"));
        }
        if self.sync.page_cooldown_every == 0 {
            return Err(AppError::validation("sync.page_cooldown_every must be > 0"));
        }
        if self.sync.contact_cooldown_every == 0 {
            return Err(AppError::validation(
                "sync.contact_cooldown_every must be > 0",
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::validation("database.url is empty"));
        }
        Ok(())
    }
}

/// CRM API access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    /// Base URL of the CRM API
    #[serde(default)]
    pub base_url: String,

    /// Bearer credential attached to every call
    #[serde(default)]
    pub token: String,

    /// Location scope for contact queries
    #[serde(default)]
    pub location_id: String,

    /// Fixed API-version header value
    #[serde(default = "defaults::api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            location_id: String::new(),
            api_version: defaults::api_version(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Pacing and batching behavior.
///
/// The cooldowns are a coarse rate-limit safeguard against the upstream
/// API, not a precise token bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Contacts requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Cooldown after every Nth contact page
    #[serde(default = "defaults::page_cooldown_every")]
    pub page_cooldown_every: u64,

    /// Page cooldown duration in milliseconds
    #[serde(default = "defaults::cooldown_ms")]
    pub page_cooldown_ms: u64,

    /// Unconditional delay after each contact's task fetch, in milliseconds
    #[serde(default = "defaults::contact_delay_ms")]
    pub contact_delay_ms: u64,

    /// Extra cooldown after every Nth contact
    #[serde(default = "defaults::contact_cooldown_every")]
    pub contact_cooldown_every: u64,

    /// Contact cooldown duration in milliseconds
    #[serde(default = "defaults::cooldown_ms")]
    pub contact_cooldown_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            page_cooldown_every: defaults::page_cooldown_every(),
            page_cooldown_ms: defaults::cooldown_ms(),
            contact_delay_ms: defaults::contact_delay_ms(),
            contact_cooldown_every: defaults::contact_cooldown_every(),
            contact_cooldown_ms: defaults::cooldown_ms(),
        }
    }
}

/// Relational sink settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection URL
    #[serde(default)]
    pub url: String,
}

mod defaults {
    pub fn api_version() -> String {
        "2021-07-28".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> u32 {
        100
    }
    pub fn page_cooldown_every() -> u64 {
        5
    }
    pub fn cooldown_ms() -> u64 {
        1000
    }
    pub fn contact_delay_ms() -> u64 {
        300
    }
    pub fn contact_cooldown_every() -> u64 {
        20
    }
}
