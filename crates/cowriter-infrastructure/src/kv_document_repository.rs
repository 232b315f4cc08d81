//! Document history repository backed by the storage adapter.
//!
//! The whole collection is stored as one JSON array under
//! [`HISTORY_KEY`].

use async_trait::async_trait;
use std::sync::Arc;

use cowriter_core::document::{Document, DocumentRepository};
use cowriter_core::error::Result;
use cowriter_core::storage::HISTORY_KEY;

use crate::persistence::StorageAdapter;

pub struct KvDocumentRepository {
    adapter: Arc<StorageAdapter>,
}

impl KvDocumentRepository {
    pub fn new(adapter: Arc<StorageAdapter>) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl DocumentRepository for KvDocumentRepository {
    async fn load_all(&self) -> Result<Vec<Document>> {
        // Missing and non-array records read as empty.
        let Some(records) = self.adapter.load::<Vec<serde_json::Value>>(HISTORY_KEY) else {
            return Ok(Vec::new());
        };

        let total = records.len();
        let documents: Vec<Document> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(document) => Some(document),
                Err(e) => {
                    tracing::warn!(
                        "[KvDocumentRepository] Skipping malformed document at index {}: {}",
                        index,
                        e
                    );
                    None
                }
            })
            .collect();

        if documents.len() < total {
            tracing::warn!(
                "[KvDocumentRepository] Kept {} of {} stored documents",
                documents.len(),
                total
            );
        }
        Ok(documents)
    }

    async fn save_all(&self, documents: &[Document]) -> Result<()> {
        if documents.is_empty() {
            tracing::debug!("[KvDocumentRepository] Refusing to persist an empty history");
            return Ok(());
        }
        self.adapter.save(HISTORY_KEY, documents);
        Ok(())
    }
}
