//! Document domain models and repository traits.

mod model;
mod repository;

pub use model::{
    DEFAULT_DOCUMENT_TITLE, Document, DocumentType, generate_document_id, most_recent, now_millis,
};
pub use repository::DocumentRepository;
