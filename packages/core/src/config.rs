//! Application configuration
//!
//! Loaded from a JSON file (every field optional), then overridden from the
//! environment:
//!
//! - `PORTFOLIO_ADMIN_PASSWORD`
//! - `PORTFOLIO_STORAGE_DIR`
//! - `PORTFOLIO_WORDS_PER_MINUTE`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::models::DEFAULT_CODE_LANGUAGE;

pub const ENV_ADMIN_PASSWORD: &str = "PORTFOLIO_ADMIN_PASSWORD";
pub const ENV_STORAGE_DIR: &str = "PORTFOLIO_STORAGE_DIR";
pub const ENV_WORDS_PER_MINUTE: &str = "PORTFOLIO_WORDS_PER_MINUTE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Password guarding the editor; `None` disables admin login
    pub admin_password: Option<String>,

    /// Reading speed used for `reading_time`
    pub words_per_minute: u32,

    /// How long a blurred block stays active for toolbar commands
    pub blur_grace_period_ms: u64,

    /// Language given to new code blocks and undetectable clipboard pastes
    pub default_code_language: String,

    /// Content directory for the JSON file store
    pub storage_dir: Option<PathBuf>,

    /// Lifetime of clipboard snippets
    pub clipboard_ttl_hours: u32,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            admin_password: None,
            words_per_minute: 200,
            blur_grace_period_ms: 150,
            default_code_language: DEFAULT_CODE_LANGUAGE.to_string(),
            storage_dir: None,
            clipboard_ttl_hours: 24,
        }
    }
}

impl PortfolioConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `PORTFOLIO_*` environment variables on top of this config
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.admin_password = Some(password);
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(wpm) = lookup(ENV_WORDS_PER_MINUTE) {
            self.words_per_minute = wpm.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be a positive integer, got '{}'", ENV_WORDS_PER_MINUTE, wpm))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(&self.admin_password, Some(p) if p.trim().is_empty()) {
            return Err(ConfigError::Invalid("admin_password cannot be empty".to_string()));
        }
        if self.words_per_minute == 0 {
            return Err(ConfigError::Invalid("words_per_minute must be greater than 0".to_string()));
        }
        if self.clipboard_ttl_hours == 0 {
            return Err(ConfigError::Invalid("clipboard_ttl_hours must be greater than 0".to_string()));
        }
        if self.default_code_language.trim().is_empty() {
            return Err(ConfigError::Invalid("default_code_language cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn blur_grace_period(&self) -> Duration {
        Duration::from_millis(self.blur_grace_period_ms)
    }

    pub fn clipboard_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.clipboard_ttl_hours))
    }

    /// Content directory, defaulting to `~/.portfolio/content`
    pub fn resolve_storage_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::Invalid("Cannot determine home directory".to_string()))?;
        Ok(home.join(".portfolio").join("content"))
    }
}
