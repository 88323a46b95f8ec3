//! Engine configuration — loaded from `config.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

const DEFAULT_DATABASE: &str = "landmanager.db";

/// Tunables for the claim workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LandConfig {
    /// Cost per block-volume unit.
    pub block_price: i64,
    /// Maximum number of claims one owner may hold.
    pub limit: i64,
    /// SQLite database path.
    pub database: String,
}

impl Default for LandConfig {
    fn default() -> Self {
        Self {
            block_price: 1,
            limit: 3,
            database: DEFAULT_DATABASE.to_owned(),
        }
    }
}

impl LandConfig {
    /// Load config from a TOML file. A missing file yields the defaults;
    /// missing keys fall back individually.
    pub fn load(config_path: &Path) -> Result<Self, String> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(config_path)
            .map_err(|e| format!("Failed to read config: {e}"))?;
        toml::from_str(&raw).map_err(|e| format!("Invalid config: {e}"))
    }

    /// Write a default config file if none exists yet.
    pub fn ensure_config(config_path: &Path) -> Result<(), String> {
        if config_path.exists() {
            return Ok(());
        }

        let body = toml::to_string_pretty(&Self::default())
            .map_err(|e| format!("Failed to serialize default config: {e}"))?;
        std::fs::write(config_path, body).map_err(|e| format!("Failed to write config: {e}"))?;
        log::info!("landmanager: Created default config at {config_path:?}");
        Ok(())
    }
}
