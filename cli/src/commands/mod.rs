//! CLI command implementations.

pub mod info;
pub mod kill;
pub mod list;

use anyhow::{Context, Result};
use hostscope_core::{Config, ConfigStore, HostServices};

/// Load the user's configuration, falling back to defaults when absent.
fn load_config() -> Result<Config> {
    let store = ConfigStore::new()?;
    store
        .load()
        .with_context(|| format!("loading {}", store.config_path().display()))
}

/// Services for the current host, configured from disk.
fn host_services() -> Result<HostServices> {
    let config = load_config()?;
    Ok(HostServices::system(&config)?)
}
