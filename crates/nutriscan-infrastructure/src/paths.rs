//! Unified path management for NutriScan configuration and data files.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "nutriscan";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither a base directory nor a platform directory is available.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where NutriScan keeps its files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/nutriscan/         # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/nutriscan/    # Data directory
/// ├── storage/                 # Key-value slots (assessment history)
/// └── logs/                    # Application logs
///     └── nutriscan.log.YYYY-MM-DD
/// ```
///
/// With a base directory, both config and data live directly under it.
#[derive(Debug, Clone, Default)]
pub struct NutriscanPaths {
    base: Option<PathBuf>,
}

impl NutriscanPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn storage_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
