//! File-backed key-value store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cowriter_core::error::Result;
use cowriter_core::storage::KeyValueStore;

use super::atomic_file::AtomicFile;

/// A [`KeyValueStore`] kept as a single JSON object on disk.
///
/// Every call reads the file; writes go through a locked atomic update so
/// several processes may share one file.
pub struct FileKeyValueStore {
    file: AtomicFile<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::json(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .file
            .load()?
            .and_then(|mut entries| entries.remove(key)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(BTreeMap::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
        })?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.file.update(BTreeMap::new(), |entries| {
            entries.remove(key);
        })?;
        Ok(())
    }
}
