//! Infrastructure layer for CoWriter: key-value storage, the storage adapter,
//! record repositories, paths and application settings.

pub mod auth_token_store;
pub mod dto;
pub mod kv_config_repository;
pub mod kv_document_repository;
pub mod kv_document_type_repository;
pub mod paths;
pub mod persistence;
pub mod settings_service;
pub mod storage;

pub use crate::auth_token_store::KvAuthTokenStore;
pub use crate::kv_config_repository::KvConfigRepository;
pub use crate::kv_document_repository::KvDocumentRepository;
pub use crate::kv_document_type_repository::KvDocumentTypeRepository;
pub use crate::paths::CoWriterPaths;
pub use crate::persistence::StorageAdapter;
pub use crate::settings_service::SettingsService;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
