//! TOML configuration for dnsswitch
//!
//! Loaded from `<data dir>/config.toml` unless a path is given. A missing file
//! is written out with defaults on first load.

use crate::constants::{DEFAULT_TARGET_SERVERS, KEYCHAIN_ACCOUNT, KEYCHAIN_SERVICE};
use crate::db::get_data_dir;
use crate::models::CredentialProfile;
use crate::utils::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Resolvers applied by `connect` when none are given on the command line
    pub target_servers: Vec<String>,
    pub keychain_service: String,
    pub keychain_account: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_servers: DEFAULT_TARGET_SERVERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            keychain_service: KEYCHAIN_SERVICE.into(),
            keychain_account: KEYCHAIN_ACCOUNT.into(),
        }
    }
}

impl AppConfig {
    pub fn credential_profile(&self) -> CredentialProfile {
        CredentialProfile::new(&self.keychain_service, &self.keychain_account)
    }
}

/// Returns `<data dir>/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_data_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration, creating a default file when missing.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let config = AppConfig::default();
        save_config(&path, &config)?;
        tracing::info!(path = %path.display(), "Wrote default configuration");
        return Ok(config);
    }

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body).map_err(io_err)
}
