//! Application context for the Pantry CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config file so
//! handlers can open the ledger without re-reading configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use pantry_core::{FsBlobStore, KeyPolicy, Ledger, SqliteStore};

use crate::cli::Cli;
use crate::config::{default_blob_root, default_config_path, read_config, PantryConfig};
use crate::errors::CliError;

pub type CliLedger = Ledger<SqliteStore, FsBlobStore>;

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("PANTRY_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<PantryConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, or `None` when none has been written yet.
    pub fn config(&self) -> anyhow::Result<Option<&PantryConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                debug!(path = %path.display(), "no config file");
                return Ok::<_, anyhow::Error>(None);
            }
            debug!(path = %path.display(), "loading config");
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Store path from `--store`/`PANTRY_STORE`, else from the config.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.store.as_deref() {
            return Ok(PathBuf::from(path));
        }
        match self.config()? {
            Some(config) => Ok(PathBuf::from(&config.store.path)),
            None => {
                let config_path = resolve_config_path()?;
                Err(CliError::not_found(
                    format!("No pantry configured (looked for {}).", config_path.display()),
                    "Hint: Run `pantry init` or pass --store <PATH>.",
                )
                .into())
            }
        }
    }

    pub fn blob_store(&self, store_path: &std::path::Path) -> anyhow::Result<FsBlobStore> {
        let blobs = match self.config()? {
            Some(config) => {
                let store = FsBlobStore::new(&config.blobs.root);
                match config.blobs.base_url.as_deref() {
                    Some(url) => store.with_base_url(url),
                    None => store,
                }
            }
            None => FsBlobStore::new(default_blob_root(store_path)),
        };
        Ok(blobs)
    }

    pub fn key_policy(&self) -> anyhow::Result<KeyPolicy> {
        Ok(self
            .config()?
            .map(|config| config.ledger.key_policy)
            .unwrap_or_default())
    }

    /// Open the store and wire it to the configured blob store.
    pub fn open_ledger(&self) -> anyhow::Result<CliLedger> {
        let store_path = self.store_path()?;
        debug!(path = %store_path.display(), "opening store");
        let store = SqliteStore::open(&store_path)?;
        let blobs = self.blob_store(&store_path)?;
        Ok(Ledger::new(store, blobs).with_key_policy(self.key_policy()?))
    }
}
