//! Configuration repository trait.

use async_trait::async_trait;

use super::model::UserConfig;
use crate::error::Result;

/// Persistence for the user configuration.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Loads the stored configuration, `None` if nothing usable is stored.
    async fn load(&self) -> Result<Option<UserConfig>>;

    /// Saves the configuration. Eval scores and results are not persisted.
    async fn save(&self, config: &UserConfig) -> Result<()>;
}
