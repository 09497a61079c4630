use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use ntd_core::HttpClientHandle;
use ntd_storage_sqlite::SqliteStorage;
use tracing::info;

use crate::{store::Store, Config};

/// Connection settings handed to views as the store's HTTP client. Requests
/// themselves are made by the views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl From<&Config> for HttpClientConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            endpoint: cfg.api.endpoint.clone(),
            timeout: Duration::from_millis(cfg.api.timeout_ms),
        }
    }
}

/// A ready-to-use client: configuration plus the one store for this process.
pub struct Client {
    pub root: PathBuf,
    pub cfg: Config,
    pub store: Store,
}

impl Client {
    /// Loads (or writes default) configuration under `root`, applies
    /// environment overrides, opens the session db and injects the HTTP client.
    pub fn open(root: PathBuf) -> Result<Self> {
        Self::open_with_env(root, |k| std::env::var(k).ok())
    }

    pub fn open_with_env(root: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cfg = load_or_init_config(&root)?.with_env(lookup)?;

        let db_path = cfg.storage_path(&root);
        let storage = SqliteStorage::open(&db_path)?;
        let mut store = Store::open(cfg.api_settings(), Box::new(storage))?;
        store.set_http_client(HttpClientHandle::new(HttpClientConfig::from(&cfg)))?;
        info!(root = %root.display(), db = %db_path.display(), "client ready");

        Ok(Self { root, cfg, store })
    }

    /// Writes default configuration and creates the session db. Returns the db path.
    pub fn init_dir(root: &Path) -> Result<PathBuf> {
        let cfg = load_or_init_config(root)?.with_env(|k| std::env::var(k).ok())?;
        let db_path = cfg.storage_path(root);
        let _ = SqliteStorage::open(&db_path)?;
        Ok(db_path)
    }
}

fn load_or_init_config(root: &Path) -> Result<Config> {
    let cfg_path = Config::config_path(root);
    if cfg_path.exists() {
        return Config::load_from(&cfg_path);
    }
    let cfg = Config::default();
    cfg.save_to(&cfg_path)?;
    Ok(cfg)
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("root", &self.root).field("cfg", &self.cfg).finish_non_exhaustive()
    }
}
