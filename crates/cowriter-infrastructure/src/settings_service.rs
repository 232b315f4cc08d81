//! Application settings service.
//!
//! Loads [`AppSettings`] from `settings.toml` and applies environment
//! overrides. A missing file is created with defaults; an unreadable one is
//! ignored with a warning.

use std::path::PathBuf;

use cowriter_core::CoWriterError;
use cowriter_core::error::Result;
use cowriter_core::settings::AppSettings;

use crate::paths::CoWriterPaths;
use crate::storage::AtomicFile;

/// Overrides [`AppSettings::backend_url`].
pub const BACKEND_URL_ENV: &str = "COWRITER_BACKEND_URL";
/// Overrides [`AppSettings::storage_file`].
pub const STORAGE_FILE_ENV: &str = "COWRITER_STORAGE_FILE";

/// Loads and saves the settings file.
pub struct SettingsService {
    paths: CoWriterPaths,
    file: AtomicFile<AppSettings>,
}

impl SettingsService {
    pub fn new(paths: CoWriterPaths) -> Result<Self> {
        let path = paths
            .settings_file()
            .map_err(|e| CoWriterError::config(e.to_string()))?;
        Ok(Self {
            paths,
            file: AtomicFile::toml(path),
        })
    }

    pub fn settings_path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Loads settings from disk and applies environment overrides.
    pub fn load(&self) -> AppSettings {
        let mut settings = self.load_file();
        apply_overrides(&mut settings, |name| std::env::var(name).ok());
        settings
    }

    /// Loads settings from disk only.
    pub fn load_file(&self) -> AppSettings {
        match self.file.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let defaults = AppSettings::default();
                match self.file.save(&defaults) {
                    Ok(()) => tracing::info!(
                        "[SettingsService] Wrote default settings to {}",
                        self.file.path().display()
                    ),
                    Err(e) => tracing::warn!("[SettingsService] Failed to write defaults: {}", e),
                }
                defaults
            }
            Err(e) => {
                tracing::warn!(
                    "[SettingsService] Ignoring unreadable {}: {}",
                    self.file.path().display(),
                    e
                );
                AppSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        self.file.save(settings)?;
        Ok(())
    }

    /// Where the key-value storage lives for these settings.
    pub fn storage_file(&self, settings: &AppSettings) -> Result<PathBuf> {
        match &settings.storage_file {
            Some(path) => Ok(path.clone()),
            None => self
                .paths
                .storage_file()
                .map_err(|e| CoWriterError::config(e.to_string())),
        }
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        self.paths
            .logs_dir()
            .map_err(|e| CoWriterError::config(e.to_string()))
    }
}

/// Applies environment overrides read through `lookup`.
pub fn apply_overrides<F>(settings: &mut AppSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
        settings.backend_url = url;
    }
    if let Some(path) = lookup(STORAGE_FILE_ENV).filter(|v| !v.trim().is_empty()) {
        settings.storage_file = Some(PathBuf::from(path));
    }
}
