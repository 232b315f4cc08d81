//! User configuration repository backed by the storage adapter.

use async_trait::async_trait;
use std::sync::Arc;

use cowriter_core::config::{ConfigRepository, UserConfig};
use cowriter_core::error::Result;
use cowriter_core::storage::CONFIG_KEY;

use crate::dto::UserConfigDto;
use crate::persistence::StorageAdapter;

/// Stores the configuration under [`CONFIG_KEY`] through [`UserConfigDto`].
pub struct KvConfigRepository {
    adapter: Arc<StorageAdapter>,
}

impl KvConfigRepository {
    pub fn new(adapter: Arc<StorageAdapter>) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl ConfigRepository for KvConfigRepository {
    async fn load(&self) -> Result<Option<UserConfig>> {
        Ok(self
            .adapter
            .load::<UserConfigDto>(CONFIG_KEY)
            .map(UserConfig::from))
    }

    async fn save(&self, config: &UserConfig) -> Result<()> {
        self.adapter.save(CONFIG_KEY, &UserConfigDto::from(config));
        Ok(())
    }
}
