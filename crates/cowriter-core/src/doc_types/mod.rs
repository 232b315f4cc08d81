//! Document-type allowlist.

mod model;
mod repository;

pub use model::{DocumentTypeAllowlist, ToggleOutcome};
pub use repository::DocumentTypeRepository;
