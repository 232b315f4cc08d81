//! Document-type allowlist repository trait.

use async_trait::async_trait;

use super::model::DocumentTypeAllowlist;
use crate::error::Result;

/// Persistence for the allowlist, stored independently of the configuration.
#[async_trait]
pub trait DocumentTypeRepository: Send + Sync {
    /// Loads the allowlist; `None` when missing, unreadable or empty.
    async fn load(&self) -> Result<Option<DocumentTypeAllowlist>>;

    async fn save(&self, allowlist: &DocumentTypeAllowlist) -> Result<()>;
}
