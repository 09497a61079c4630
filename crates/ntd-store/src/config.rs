use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ntd_core::ApiSettings;

pub const ENV_API_ENDPOINT: &str = "NTD_API_ENDPOINT";
pub const ENV_API_TIMEOUT: &str = "NTD_API_TIMEOUT";
pub const ENV_SOURCE_IP_ADDRESS: &str = "NTD_SOURCE_IP_ADDRESS";
pub const ENV_STORAGE_PATH: &str = "NTD_STORAGE_PATH";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    /// Address scans originate from; shown so users can allow-list it.
    #[serde(default)]
    pub source_ip_address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Session database. Relative paths are taken from the client root; `~` is expanded.
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                endpoint: "http://127.0.0.1:5000/api".to_string(),
                timeout_ms: 10_000,
                source_ip_address: None,
            },
            storage: StorageConfig {
                path: ".ntd/session.db".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse ntd.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Deployment overrides, the same knobs a build environment would set.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(endpoint) = lookup(ENV_API_ENDPOINT) {
            self.api.endpoint = endpoint;
        }
        if let Some(timeout) = lookup(ENV_API_TIMEOUT) {
            self.api.timeout_ms = timeout
                .trim()
                .parse()
                .with_context(|| format!("{ENV_API_TIMEOUT}={timeout:?} is not a millisecond count"))?;
        }
        if let Some(ip) = lookup(ENV_SOURCE_IP_ADDRESS) {
            self.api.source_ip_address = Some(ip);
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            self.storage.path = path;
        }
        Ok(self)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            endpoint: self.api.endpoint.clone(),
            timeout_ms: self.api.timeout_ms,
            source_ip_address: self.api.source_ip_address.clone(),
        }
    }

    pub fn storage_path(&self, root: &Path) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&self.storage.path).as_ref());
        if expanded.is_absolute() {
            expanded
        } else {
            root.join(expanded)
        }
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".ntd").join("ntd.toml")
    }
}
