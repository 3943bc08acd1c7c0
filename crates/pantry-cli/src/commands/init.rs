use std::path::PathBuf;

use pantry_core::{KeyPolicy, SqliteStore};
use tracing::warn;
use url::Url;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_blob_root, default_store_path, write_config, PantryConfig};
use crate::errors::CliError;
use crate::output::print_status;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() {
        return Err(CliError::invalid_input(format!(
            "Pantry is already configured at {}",
            config_path.display()
        ))
        .into());
    }

    let store_path = match args.path.as_deref().or(ctx.cli().store.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };
    let blob_root = match args.blob_dir.as_deref() {
        Some(dir) => PathBuf::from(dir),
        None => default_blob_root(&store_path),
    };
    let key_policy = match args.key_policy.as_deref() {
        Some(value) => value.parse::<KeyPolicy>()?,
        None => KeyPolicy::default(),
    };
    if let Some(url) = args.base_url.as_deref() {
        validate_base_url(url)?;
    }
    if store_path.exists() {
        return Err(CliError::invalid_input(format!(
            "Store file already exists: {}",
            store_path.display()
        ))
        .into());
    }

    // Store last: a failed init must not leave a store file behind.
    std::fs::create_dir_all(&blob_root).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create photo directory {}: {}",
            blob_root.display(),
            e
        )
    })?;
    SqliteStore::create(&store_path)?;

    let config = PantryConfig::new(&store_path, &blob_root, args.base_url.clone(), key_policy);
    if let Err(err) = write_config(&config_path, &config) {
        if let Err(cleanup) = std::fs::remove_file(&store_path) {
            warn!(path = %store_path.display(), error = %cleanup, "could not remove new store");
        }
        return Err(err);
    }

    print_status(
        &format!("Initialized pantry at {}", store_path.display()),
        ctx.quiet(),
    );
    if !ctx.quiet() {
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}

fn validate_base_url(value: &str) -> anyhow::Result<()> {
    let parsed = Url::parse(value)
        .map_err(|e| CliError::invalid_input(format!("Invalid --base-url {}: {}", value, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CliError::invalid_input(format!(
            "--base-url must be an http(s) URL: {}",
            value
        ))
        .into());
    }
    Ok(())
}
