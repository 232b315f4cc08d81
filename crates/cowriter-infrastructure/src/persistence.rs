//! Storage adapter over a [`KeyValueStore`].
//!
//! Storage may be missing or may refuse writes. Loading a missing or
//! malformed record yields `None` and a write failure is logged, so callers
//! always fall back to in-memory defaults instead of failing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;

use cowriter_core::storage::KeyValueStore;

/// Throwaway key written and removed by [`StorageAdapter::probe`].
pub const PROBE_KEY: &str = "_test_storage_";

/// JSON persistence on top of a string key-value store.
pub struct StorageAdapter {
    store: Arc<dyn KeyValueStore>,
    available: AtomicBool,
}

impl StorageAdapter {
    /// Wraps `store` and probes it once.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let adapter = Self {
            store,
            available: AtomicBool::new(false),
        };
        if !adapter.probe() {
            tracing::warn!("[StorageAdapter] Storage is unavailable; state will not be persisted");
        }
        adapter
    }

    /// Runs a write/read/delete round trip and records the result.
    ///
    /// Returns true only if the read returns exactly what was written.
    pub fn probe(&self) -> bool {
        let ok = self.round_trip();
        self.available.store(ok, Ordering::SeqCst);
        ok
    }

    /// Result of the last probe.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn round_trip(&self) -> bool {
        let result = (|| {
            self.store.set_item(PROBE_KEY, PROBE_KEY)?;
            let read = self.store.get_item(PROBE_KEY)?;
            self.store.remove_item(PROBE_KEY)?;
            Ok::<_, cowriter_core::CoWriterError>(read.as_deref() == Some(PROBE_KEY))
        })();
        match result {
            Ok(ok) => ok,
            Err(e) => {
                tracing::debug!("[StorageAdapter] Probe failed: {}", e);
                false
            }
        }
    }

    /// Loads and decodes the JSON record under `key`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("[StorageAdapter] Ignoring malformed '{}': {}", key, e);
                None
            }
        }
    }

    /// Encodes `value` as JSON and stores it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.save_raw(key, &raw),
            Err(e) => tracing::error!("[StorageAdapter] Failed to encode '{}': {}", key, e),
        }
    }

    /// Reads the raw string under `key`.
    pub fn load_raw(&self, key: &str) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        match self.store.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("[StorageAdapter] Failed to read '{}': {}", key, e);
                None
            }
        }
    }

    /// Writes a raw string under `key`.
    pub fn save_raw(&self, key: &str, raw: &str) {
        if !self.is_available() {
            return;
        }
        if let Err(e) = self.store.set_item(key, raw) {
            tracing::error!("[StorageAdapter] Failed to write '{}': {}", key, e);
        }
    }

    pub fn remove(&self, key: &str) {
        if !self.is_available() {
            return;
        }
        if let Err(e) = self.store.remove_item(key) {
            tracing::error!("[StorageAdapter] Failed to remove '{}': {}", key, e);
        }
    }
}
