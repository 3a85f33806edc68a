//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use nutriscan_core::config::AppConfig;
use nutriscan_core::error::{NutriscanError, Result};

use crate::paths::NutriscanPaths;

/// Loads [`AppConfig`] from a TOML file.
///
/// A missing or empty file yields the defaults; a malformed file is a
/// configuration error.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses the platform config location (`~/.config/nutriscan/config.toml`).
    pub fn from_default_location() -> Result<Self> {
        let path = NutriscanPaths::default()
            .config_file()
            .map_err(|e| NutriscanError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            NutriscanError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
