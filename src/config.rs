use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{tlog_debug, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Skip the confirmation prompt when deleting a list.
    #[serde(default)]
    pub skip_confirm: bool,
    /// Override for the directory holding the store file.
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_confirm: false,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn tally_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".tally"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::tally_dir()?.join("tally.toml"))
    }

    /// Path of the JSON store file, honoring the `data_dir` override.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(expand_tilde(dir).join("lists.json")),
            None => Ok(Self::tally_dir()?.join("lists.json")),
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        tlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            tlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(&path)?)?;
        tlog_debug!(
            "Config loaded: skip_confirm={}, data_dir={:?}",
            config.skip_confirm,
            config.data_dir
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let tally_dir = Self::tally_dir()?;
        tlog_debug!("Config::save tally_dir={}", tally_dir.display());
        if !tally_dir.exists() {
            fs::create_dir_all(&tally_dir)?;
        }
        let path = Self::config_path()?;
        fs::write(&path, toml::to_string_pretty(self)?)?;
        tlog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        let tally_dir = Self::tally_dir()?;
        if !tally_dir.exists() {
            tlog_debug!("Creating tally directory: {}", tally_dir.display());
            fs::create_dir_all(&tally_dir)?;
        }
        if let Some(parent) = self.store_path()?.parent() {
            if !parent.exists() {
                tlog_debug!("Creating data directory: {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
