//! Key-value stores and the atomic file layer beneath them.

mod atomic_file;
mod file_kv;
mod memory_kv;

pub use atomic_file::{AtomicFile, AtomicFileError, FileFormat};
pub use file_kv::FileKeyValueStore;
pub use memory_kv::MemoryKeyValueStore;
