//! Configuration management for onduty.
//!
//! Loads configuration from ${ONDUTY_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{Account, AllowListAuthenticator};
use crate::form::LoginMode;

fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for onduty configuration and data directories.
    //!
    //! ONDUTY_HOME resolution order:
    //! 1. ONDUTY_HOME environment variable (if set)
    //! 2. ~/.config/onduty (default)
    //! 3. ./.onduty when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the onduty home directory.
    pub fn onduty_home() -> PathBuf {
        if let Ok(home) = std::env::var("ONDUTY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".onduty"),
            |h| h.join(".config").join("onduty"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        onduty_home().join("config.toml")
    }

    /// Returns the default log directory.
    pub fn logs_dir() -> PathBuf {
        onduty_home().join("logs")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `ONDUTY_LOG` is unset.
    pub level: String,
    /// Directory for log files (defaults to `$ONDUTY_HOME/logs`).
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn effective_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(paths::logs_dir)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Debounce window for live validation (ms).
    pub debounce_ms: u64,

    /// Simulated authentication latency (ms).
    pub auth_delay_ms: u64,

    /// Delay between a successful login and the redirect (ms).
    pub redirect_delay_ms: u64,

    /// Login mode selected when the form opens.
    pub default_mode: LoginMode,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Allow-listed accounts.
    pub accounts: Vec<Account>,
}

impl Config {
    const DEFAULT_DEBOUNCE_MS: u64 = 500;
    const DEFAULT_AUTH_DELAY_MS: u64 = 1000;
    const DEFAULT_REDIRECT_DELAY_MS: u64 = 1000;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };
        config
            .validate()
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(config)
    }

    /// Rejects configurations the login flow cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.accounts.is_empty() {
            anyhow::bail!("At least one account must be configured");
        }
        for (idx, account) in self.accounts.iter().enumerate() {
            if account.email.trim().is_empty() {
                anyhow::bail!("accounts[{idx}] has an empty email");
            }
            if account.password.is_empty() {
                anyhow::bail!("accounts[{idx}] has an empty password");
            }
        }
        Ok(())
    }

    /// Creates a config file with the commented default template.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Serializes the effective configuration (passwords included, since
    /// they are demo values).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize config to TOML")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Zeroes every artificial delay.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.debounce_ms = 0;
        self.auth_delay_ms = 0;
        self.redirect_delay_ms = 0;
        self
    }

    /// Builds the default authenticator from the configured accounts.
    pub fn authenticator(&self) -> AllowListAuthenticator {
        AllowListAuthenticator::new(self.accounts.clone())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            auth_delay_ms: Self::DEFAULT_AUTH_DELAY_MS,
            redirect_delay_ms: Self::DEFAULT_REDIRECT_DELAY_MS,
            default_mode: LoginMode::default(),
            logging: LoggingConfig::default(),
            accounts: Account::defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.auth_delay_ms, 1000);
        assert_eq!(config.redirect_delay_ms, 1000);
        assert_eq!(config.default_mode, LoginMode::Employee);
        assert_eq!(config.accounts.len(), 2);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "auth_delay_ms = 250\ndefault_mode = \"admin\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.auth_delay_ms, 250);
        assert_eq!(config.default_mode, LoginMode::Admin);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.accounts, Account::defaults());
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.debounce_ms, defaults.debounce_ms);
        assert_eq!(parsed.auth_delay_ms, defaults.auth_delay_ms);
        assert_eq!(parsed.redirect_delay_ms, defaults.redirect_delay_ms);
        assert_eq!(parsed.default_mode, defaults.default_mode);
        assert_eq!(parsed.accounts, defaults.accounts);
    }

    #[test]
    fn test_init_creates_config_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("debounce_ms = 500"));
        assert!(contents.contains("[[accounts]]"));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_empty_account_list_is_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "accounts = []\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("At least one account"));
    }

    #[test]
    fn test_account_with_empty_password_is_rejected() {
        let config = Config {
            accounts: vec![Account::new(LoginMode::Admin, "a@b.c", "")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_without_delays_zeroes_timers() {
        let config = Config::default().without_delays();
        assert_eq!(config.debounce(), Duration::ZERO);
        assert_eq!(config.auth_delay(), Duration::ZERO);
        assert_eq!(config.redirect_delay(), Duration::ZERO);
    }
}
