//! Application configuration loaded from an optional `taskdeck.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use taskdeck_store_json::DEFAULT_FILE_NAME;

const CONFIG_FILE: &str = "taskdeck.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    store: StoreConfig,
}

/// Store configuration block.
#[derive(Debug, Clone, Deserialize)]
struct StoreConfig {
    #[serde(default = "default_store_file")]
    path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_file(),
        }
    }
}

fn default_store_file() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_NAME)
}

impl AppConfig {
    /// Load configuration from `dir`, falling back to defaults when the
    /// config file is absent.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    /// Unlike the task store, user-authored configuration does not fail soft.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        Ok(config)
    }

    /// Backing file path, resolved relative to `dir` unless absolute.
    #[must_use]
    pub fn store_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        if self.store.path.is_absolute() {
            self.store.path.clone()
        } else {
            dir.as_ref().join(&self.store.path)
        }
    }
}
