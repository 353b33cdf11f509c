//! Configuration management for steamshelf
//!
//! Handles the small persisted record (API key, Steam ID, username) and the
//! network tuning knobs. The record lives in a TOML file under the user's home
//! directory; environment variables prefixed with `STEAM_` override it when the
//! effective settings are resolved.

mod network;

pub use network::NetworkConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Steam API key not found. Set STEAM_API_KEY env var or run: steamshelf config set-key <key>"
    )]
    MissingApiKey,

    #[error("Steam ID not configured. Run: steamshelf config set-user <username>")]
    MissingSteamId,

    #[error("Home directory could not be determined")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to resolve settings: {0}")]
    Settings(#[from] config::ConfigError),
}

/// Directory name under the home directory
pub const CONFIG_DIR_NAME: &str = ".steamshelf";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Prefix for environment overrides (`STEAM_API_KEY`, `STEAM_STEAM_ID`)
pub const ENV_PREFIX: &str = "STEAM";

/// Persisted steamshelf configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfConfig {
    /// Steam Web API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// 64-bit Steam ID of the configured user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<String>,

    /// Name the user was configured with (vanity name or raw ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default)]
    pub network: NetworkConfig,
}

impl ShelfConfig {
    /// Default config file location (`~/.steamshelf/config.toml`)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the persisted record from a file. A missing file is an empty record.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No configuration file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the persisted record from the default location
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&Self::default_path()?)
    }

    /// Save the record to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Save to the default location
    pub fn save_default(&self) -> Result<(), ConfigError> {
        self.save(&Self::default_path()?)
    }

    /// Resolve the effective settings: the file at `path` overlaid with
    /// `STEAM_*` environment variables.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        Self::resolve_with_env(path, None)
    }

    /// Resolve from the default location
    pub fn resolve_default() -> Result<Self, ConfigError> {
        Self::resolve(&Self::default_path()?)
    }

    /// Like [`ShelfConfig::resolve`], reading overrides from `env` instead of
    /// the process environment when given.
    pub fn resolve_with_env(
        path: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        let resolved: Self = settings.try_deserialize()?;
        Ok(resolved)
    }

    /// API key, or a configuration error when none is set
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Steam ID, or a configuration error when none is set
    pub fn require_steam_id(&self) -> Result<&str, ConfigError> {
        self.steam_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::MissingSteamId)
    }
}
