use anyhow::Result;
use clap::Subcommand;
use strum::IntoEnumIterator;

use cowriter_application::WriterSession;
use cowriter_core::doc_types::ToggleOutcome;
use cowriter_core::document::DocumentType;

#[derive(Subcommand)]
pub enum TypesAction {
    /// Show every type, marking the allowed ones
    List,
    /// Add or remove a type from the allowlist
    Toggle { document_type: DocumentType },
}

pub async fn run(session: &WriterSession, action: TypesAction) -> Result<()> {
    let store = session.doc_types();
    match action {
        TypesAction::List => {
            let allowlist = store.allowlist().await;
            for document_type in DocumentType::iter() {
                let mark = if allowlist.contains(document_type) { "x" } else { " " };
                println!("[{}] {:<10} {}", mark, document_type, document_type.description());
            }
        }
        TypesAction::Toggle { document_type } => match store.toggle(document_type).await {
            ToggleOutcome::Added => println!("Allowed {}", document_type),
            ToggleOutcome::Removed => println!("Removed {}", document_type),
            ToggleOutcome::Refused => {
                println!("{} is the only allowed type and cannot be removed", document_type)
            }
        },
    }
    Ok(())
}
