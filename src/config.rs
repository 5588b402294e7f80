use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for turnero
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory where the appointment data lives (defaults to ~/.turnero)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from the default location (~/.turnero/config.toml)
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            // Return default config if file doesn't exist
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.turnero/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join("config.toml"))
    }

    /// Get the default data directory (~/.turnero)
    pub fn default_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        Ok(PathBuf::from(home).join(".turnero"))
    }
}

/// Resolve the data directory based on priority:
/// 1. explicit --data-dir flag
/// 2. TURNERO_HOME environment variable
/// 3. data_dir from the config file
/// 4. ~/.turnero
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    if let Ok(env_dir) = std::env::var("TURNERO_HOME") {
        if !env_dir.is_empty() {
            return Ok(PathBuf::from(env_dir));
        }
    }

    let config = Config::load()?;
    if let Some(dir) = config.data_dir {
        return Ok(dir);
    }

    Config::default_dir()
}
