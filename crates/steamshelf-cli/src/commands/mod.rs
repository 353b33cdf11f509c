pub mod catalog;
pub mod config;
pub mod library;
pub mod whoami;

use anyhow::Result;
use steamshelf_config::ShelfConfig;
use steamshelf_store::{SteamStore, StoreConfig};

/// Client for commands that need the Web API key
pub(crate) fn open_store(config: &ShelfConfig) -> Result<SteamStore> {
    let api_key = config.require_api_key()?;
    let store = SteamStore::new(StoreConfig::new(api_key).with_timeout(config.network.timeout()))?;
    Ok(store)
}

/// Client for the public catalogue endpoints, which need no key
pub(crate) fn open_catalog(config: &ShelfConfig) -> Result<SteamStore> {
    let api_key = config.api_key.clone().unwrap_or_default();
    let store = SteamStore::new(StoreConfig::new(api_key).with_timeout(config.network.timeout()))?;
    Ok(store)
}
