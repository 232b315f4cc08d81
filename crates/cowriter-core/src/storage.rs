//! Key-value storage boundary.
//!
//! The persisted records live in a string key-value store with the same
//! contract as a browser's local storage: synchronous, and any call may
//! fail, in which case the store is treated as unavailable.

use crate::error::Result;

/// Key holding the document history snapshot.
pub const HISTORY_KEY: &str = "cowriter_history";
/// Key holding the user configuration.
pub const CONFIG_KEY: &str = "cowriter_config";
/// Key holding the document-type allowlist.
pub const DOCUMENT_TYPES_KEY: &str = "selectedDocumentTypes";
/// Key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "token";
/// Key holding the signed-in user's profile.
pub const AUTH_USER_KEY: &str = "user";

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}
