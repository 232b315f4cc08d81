//! Document repository trait.

use async_trait::async_trait;

use super::model::Document;
use crate::error::Result;

/// Persistence for the document history.
///
/// The history is stored as a single snapshot of the whole collection.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Loads the stored collection.
    ///
    /// Missing, unreadable or structurally invalid data loads as an empty
    /// collection.
    async fn load_all(&self) -> Result<Vec<Document>>;

    /// Replaces the stored collection.
    ///
    /// Implementations never persist an empty collection.
    async fn save_all(&self, documents: &[Document]) -> Result<()>;
}
