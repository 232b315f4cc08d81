//! Application layer for CoWriter.
//!
//! Stores that own the session state, the dispatch of actions, evals and
//! chat to the backend, and [`WriterSession`] which wires them together.

pub mod chat_session;
pub mod config_store;
pub mod connection;
pub mod debounce;
pub mod dispatch;
pub mod doc_type_store;
pub mod document_store;
pub mod session;

#[cfg(test)]
mod test_support;

pub use chat_session::{ChatSession, SendOutcome};
pub use config_store::ConfigStore;
pub use connection::{ConnectError, ConnectionManager};
pub use dispatch::{DispatchError, Dispatcher, EvalOutcome};
pub use doc_type_store::{DocumentTypeStore, DocumentTypeView};
pub use document_store::DocumentStore;
pub use session::WriterSession;
