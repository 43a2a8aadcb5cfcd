//! Configuration and credential storage
//!
//! A single TOML file holds the sticky environment choice plus the
//! credential record (API key or wallet session token). Concurrent CLI
//! invocations are not synchronized; last writer wins.

use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// API environment selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Production,
    Testnet,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.xrpl.sale/v1",
            Environment::Testnet => "https://api-testnet.xrpl.sale/v1",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Testnet => write!(f, "testnet"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "testnet" => Ok(Environment::Testnet),
            _ => Err(format!("Invalid environment: {}. Use production or testnet", s)),
        }
    }
}

/// Credential field names. At most one of `ApiKey` or the
/// `(AuthToken, WalletAddress)` pair is meaningfully populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKey {
    ApiKey,
    AuthToken,
    WalletAddress,
}

/// On-disk configuration contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: String,
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
    pub wallet_address: Option<String>,
    /// RFC 3339 expiry of the wallet session token
    pub token_expires_at: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            api_key: None,
            auth_token: None,
            wallet_address: None,
            token_expires_at: None,
        }
    }
}

/// Persistent credential store bound to one config file
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    pub config: Config,
}

impl Store {
    /// Open the store at `override_path`, or the per-user default location.
    /// A missing file yields defaults; it is created on first save.
    pub fn open(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Config::default()
        };

        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(&self.config)
            .context("Failed to serialize config")?;
        std::fs::write(&self.path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn get(&self, key: CredentialKey) -> Option<&str> {
        match key {
            CredentialKey::ApiKey => self.config.api_key.as_deref(),
            CredentialKey::AuthToken => self.config.auth_token.as_deref(),
            CredentialKey::WalletAddress => self.config.wallet_address.as_deref(),
        }
    }

    pub fn set(&mut self, key: CredentialKey, value: String) {
        match key {
            CredentialKey::ApiKey => self.config.api_key = Some(value),
            CredentialKey::AuthToken => self.config.auth_token = Some(value),
            CredentialKey::WalletAddress => self.config.wallet_address = Some(value),
        }
    }

    pub fn delete(&mut self, key: CredentialKey) {
        match key {
            CredentialKey::ApiKey => self.config.api_key = None,
            CredentialKey::AuthToken => {
                self.config.auth_token = None;
                self.config.token_expires_at = None;
            }
            CredentialKey::WalletAddress => self.config.wallet_address = None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.config.api_key.is_some() || self.config.auth_token.is_some()
    }

    /// Store backed by a throwaway temp path, for tests
    #[cfg(test)]
    pub fn ephemeral(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "xrplsale-test-{}-{}.toml",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self {
            path,
            config: Config::default(),
        }
    }
}

/// Default config file path under the per-user config directory
pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("sale", "xrpl", "xrplsale")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> Store {
        Store::ephemeral(name)
    }

    #[test]
    fn test_set_get_delete() {
        let mut store = temp_store("set-get");
        assert_eq!(store.get(CredentialKey::ApiKey), None);

        store.set(CredentialKey::ApiKey, "xsale_live_abc".to_string());
        assert_eq!(store.get(CredentialKey::ApiKey), Some("xsale_live_abc"));

        store.delete(CredentialKey::ApiKey);
        assert_eq!(store.get(CredentialKey::ApiKey), None);
    }

    #[test]
    fn test_deleting_token_clears_expiry() {
        let mut store = temp_store("expiry");
        store.set(CredentialKey::AuthToken, "tok".to_string());
        store.config.token_expires_at = Some("2025-06-01T00:00:00Z".to_string());

        store.delete(CredentialKey::AuthToken);
        assert_eq!(store.get(CredentialKey::AuthToken), None);
        assert!(store.config.token_expires_at.is_none());
    }

    #[test]
    fn test_survives_save_and_reload() {
        let mut store = temp_store("reload");
        store.set(CredentialKey::AuthToken, "session-token".to_string());
        store.set(CredentialKey::WalletAddress, "rEXAMPLE123".to_string());
        store.save().unwrap();

        let reloaded = Store::open(Some(store.path())).unwrap();
        assert_eq!(reloaded.get(CredentialKey::AuthToken), Some("session-token"));
        assert_eq!(
            reloaded.get(CredentialKey::WalletAddress),
            Some("rEXAMPLE123")
        );
        assert!(reloaded.is_authenticated());

        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("xrplsale-test-never-created.toml");
        let _ = std::fs::remove_file(&path);
        let store = Store::open(Some(&path)).unwrap();
        assert_eq!(store.config.environment, "production");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            "testnet".parse::<Environment>().unwrap(),
            Environment::Testnet
        );
        assert!("mainnet".parse::<Environment>().is_err());
        assert!(Environment::Production.base_url().starts_with("https://"));
    }
}
