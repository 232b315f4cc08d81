//! Document-type allowlist repository backed by the storage adapter.

use async_trait::async_trait;
use std::sync::Arc;

use cowriter_core::doc_types::{DocumentTypeAllowlist, DocumentTypeRepository};
use cowriter_core::error::Result;
use cowriter_core::storage::DOCUMENT_TYPES_KEY;

use crate::persistence::StorageAdapter;

/// Stores the allowlist as a JSON array of type names under
/// [`DOCUMENT_TYPES_KEY`].
pub struct KvDocumentTypeRepository {
    adapter: Arc<StorageAdapter>,
}

impl KvDocumentTypeRepository {
    pub fn new(adapter: Arc<StorageAdapter>) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl DocumentTypeRepository for KvDocumentTypeRepository {
    async fn load(&self) -> Result<Option<DocumentTypeAllowlist>> {
        // An empty array fails to decode and reads as absent.
        Ok(self.adapter.load(DOCUMENT_TYPES_KEY))
    }

    async fn save(&self, allowlist: &DocumentTypeAllowlist) -> Result<()> {
        self.adapter.save(DOCUMENT_TYPES_KEY, allowlist);
        Ok(())
    }
}
