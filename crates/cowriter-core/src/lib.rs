//! Domain layer for CoWriter.
//!
//! Models, invariants and repository traits for the document history, the
//! user configuration, the document-type allowlist, chat and eval scoring.
//! Nothing in this crate performs I/O.

pub mod auth;
pub mod chat;
pub mod config;
pub mod doc_types;
pub mod document;
pub mod error;
pub mod event;
pub mod llm;
pub mod prompt;
pub mod score;
pub mod settings;
pub mod storage;

pub use error::{CoWriterError, Result};
