//! Application settings model.
//!
//! Settings describe how this process runs (where the backend lives, where
//! state is stored, how chatty logging is). They are distinct from the
//! user's writing configuration in [`crate::config`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root of `settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Backend origin; requests go to `{backend_url}/api/v1/...`
    pub backend_url: String,
    /// Debounce window for committing edits into the document history
    pub autosave_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    /// Overrides the default location of the key-value storage file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_file: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            storage_file: None,
        }
    }
}

impl AppSettings {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Versioned API root derived from `backend_url`.
    pub fn api_base_url(&self) -> String {
        format!("{}/api/v1", self.backend_url.trim_end_matches('/'))
    }
}
