use anyhow::{Context, Result};
use clap::Subcommand;
use std::io::Read;
use std::path::PathBuf;

use cowriter_application::WriterSession;
use cowriter_core::document::{Document, DocumentType};

#[derive(Subcommand)]
pub enum DocsAction {
    /// List documents, newest first in history order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create an empty document and select it
    New,
    /// Print a document's content (the selected one by default)
    Show { id: Option<String> },
    /// Select a document
    Select { id: String },
    /// Rename a document; a blank title resets it
    Rename { id: String, title: String },
    /// Change a document's type
    Retype { id: String, document_type: DocumentType },
    /// Delete a document
    Delete { id: String },
    /// Replace the selected document's content
    Edit {
        /// Read the content from this file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Use this text as the content
        #[arg(long)]
        text: Option<String>,
    },
}

pub async fn run(session: &WriterSession, action: DocsAction) -> Result<()> {
    match action {
        DocsAction::List { json } => list(session, json).await?,
        DocsAction::New => {
            let document = session.new_document().await;
            println!("Created {} ({})", document.id, document.document_type);
        }
        DocsAction::Show { id } => {
            let document = match id {
                Some(id) => find(session, &id).await?,
                None => session
                    .documents()
                    .selected()
                    .await
                    .context("No document is selected")?,
            };
            println!("# {}", document.title);
            println!("{}", document.content);
        }
        DocsAction::Select { id } => {
            session.select_document(&id).await?;
            println!("Selected {}", id);
        }
        DocsAction::Rename { id, title } => {
            session.rename_document(&id, &title).await?;
            println!("Renamed {}", id);
        }
        DocsAction::Retype { id, document_type } => {
            session.retype_document(&id, document_type).await?;
            println!("{} is now {}", id, document_type);
        }
        DocsAction::Delete { id } => {
            session.delete_document(&id).await?;
            println!("Deleted {}", id);
        }
        DocsAction::Edit { file, text } => {
            let content = match (file, text) {
                (Some(path), _) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, Some(text)) => text,
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            session.edit(content).await;
            println!("Saved {} characters", session.documents().buffer().await.chars().count());
        }
    }
    Ok(())
}

async fn list(session: &WriterSession, json: bool) -> Result<()> {
    let documents = session.documents().documents().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    let selected = session.documents().selected_id().await;
    for document in &documents {
        let marker = if selected.as_deref() == Some(document.id.as_str()) { "*" } else { " " };
        println!(
            "{} {:<24} {:<10} {}",
            marker, document.id, document.document_type, document.title
        );
    }
    Ok(())
}

async fn find(session: &WriterSession, id: &str) -> Result<Document> {
    session
        .documents()
        .documents()
        .await
        .into_iter()
        .find(|d| d.id == id)
        .with_context(|| format!("No document with id {}", id))
}
