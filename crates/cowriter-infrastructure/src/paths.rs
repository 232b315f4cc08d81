//! Unified path management for CoWriter files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cowriter/          # Config directory (platform config dir)
//! ├── settings.toml            # Application settings
//! ├── storage.json             # Key-value storage (history, config, allowlist, token)
//! └── logs/                    # Application logs
//!     └── cowriter.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "cowriter";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find the platform configuration directory")]
    ConfigDirNotFound,
}

/// Resolves CoWriter paths, optionally under a custom root.
#[derive(Debug, Clone, Default)]
pub struct CoWriterPaths {
    root: Option<PathBuf>,
}

impl CoWriterPaths {
    /// Paths under the platform configuration directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths under `root` instead of the platform directory (for testing).
    pub fn with_root(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn settings_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("settings.toml"))
    }

    /// Default location of the key-value storage file.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
