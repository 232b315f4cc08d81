//! Document history store with debounced commits.
//!
//! The store owns the document collection, the selection cursor and the
//! edit buffer. Edits land in the buffer immediately and are committed into
//! the selected document once the buffer has been quiet for the autosave
//! delay.

use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;

use cowriter_core::CoWriterError;
use cowriter_core::document::{Document, DocumentRepository, DocumentType, most_recent, now_millis};
use cowriter_core::error::Result;
use cowriter_core::event::{EventBus, SessionEvent};

use crate::debounce::Debouncer;
use crate::doc_type_store::DocumentTypeView;

/// An edit waiting for the debounce window to close.
#[derive(Debug, Clone)]
struct PendingEdit {
    /// Document selected when the edit was made
    document_id: String,
    content: String,
}

#[derive(Debug, Default)]
struct DocumentState {
    documents: Vec<Document>,
    selected_id: Option<String>,
    buffer: String,
    pending: Option<PendingEdit>,
}

impl DocumentState {
    fn find_mut(&mut self, id: &str) -> Result<&mut Document> {
        self.documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| CoWriterError::not_found("Document", id))
    }

    fn select(&mut self, document: &Document) {
        self.selected_id = Some(document.id.clone());
        self.buffer = document.content.clone();
    }

    /// Creates a fresh document at the front of the history and selects it.
    fn push_new(&mut self, document_type: DocumentType) -> Document {
        let document = Document::new(document_type, now_millis());
        self.documents.insert(0, document.clone());
        self.selected_id = Some(document.id.clone());
        self.buffer.clear();
        document
    }
}

struct Inner {
    repository: Arc<dyn DocumentRepository>,
    types: DocumentTypeView,
    bus: EventBus,
    state: Mutex<DocumentState>,
}

impl Inner {
    async fn persist(&self, state: &DocumentState) {
        if state.documents.is_empty() {
            return;
        }
        if let Err(e) = self.repository.save_all(&state.documents).await {
            tracing::warn!("[DocumentStore] Failed to persist history: {}", e);
        }
    }

    async fn commit_pending(&self) -> bool {
        let mut state = self.state.lock().await;
        let Some(edit) = state.pending.take() else {
            return false;
        };

        match state.find_mut(&edit.document_id) {
            Ok(document) => {
                document.commit_content(edit.content, now_millis());
                tracing::debug!(
                    "[DocumentStore] Committed edit: id={}, last_modified={}",
                    document.id,
                    document.last_modified
                );
            }
            Err(_) => {
                tracing::debug!(
                    "[DocumentStore] Dropping edit for vanished document {}",
                    edit.document_id
                );
                return false;
            }
        }

        self.persist(&state).await;
        true
    }
}

/// Owned document state shared by everything in a session.
pub struct DocumentStore {
    inner: Arc<Inner>,
    debouncer: Debouncer,
}

impl DocumentStore {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        types: DocumentTypeView,
        bus: EventBus,
        autosave_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                types,
                bus,
                state: Mutex::new(DocumentState::default()),
            }),
            debouncer: Debouncer::new(autosave_delay),
        }
    }

    /// Loads the history and selects the most recently modified document.
    ///
    /// An empty or unreadable history is replaced by one fresh document.
    pub async fn initialize(&self) {
        let documents = match self.inner.repository.load_all().await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!("[DocumentStore] Failed to load history: {}", e);
                Vec::new()
            }
        };

        let mut state = self.inner.state.lock().await;
        state.pending = None;
        state.documents = documents;

        match most_recent(&state.documents).cloned() {
            Some(latest) => {
                tracing::info!(
                    "[DocumentStore] Loaded {} documents, selected {}",
                    state.documents.len(),
                    latest.id
                );
                state.select(&latest);
            }
            None => {
                let document = state.push_new(self.inner.types.default_type());
                tracing::info!("[DocumentStore] Started empty history with {}", document.id);
                self.inner.persist(&state).await;
            }
        }
    }

    /// Snapshot of the whole collection in history order.
    pub async fn documents(&self) -> Vec<Document> {
        self.inner.state.lock().await.documents.clone()
    }

    pub async fn selected_id(&self) -> Option<String> {
        self.inner.state.lock().await.selected_id.clone()
    }

    pub async fn selected(&self) -> Option<Document> {
        let state = self.inner.state.lock().await;
        let id = state.selected_id.as_deref()?;
        state.documents.iter().find(|d| d.id == id).cloned()
    }

    /// Current edit buffer, including uncommitted edits.
    pub async fn buffer(&self) -> String {
        self.inner.state.lock().await.buffer.clone()
    }

    pub fn has_pending_commit(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Creates an empty document of the first allowed type and selects it.
    pub async fn new_document(&self) -> Document {
        self.debouncer.cancel();
        let mut state = self.inner.state.lock().await;
        state.pending = None;
        let document = state.push_new(self.inner.types.default_type());
        tracing::debug!(
            "[DocumentStore] New document: id={}, type={}",
            document.id,
            document.document_type
        );
        self.inner.persist(&state).await;
        drop(state);

        self.announce_selection(&document.id);
        document
    }

    /// Removes a document, keeping the collection non-empty.
    ///
    /// Deleting the only document replaces it with a fresh one. Deleting the
    /// selected document selects the most recently modified survivor.
    pub async fn delete_document(&self, id: &str) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        let position = state
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| CoWriterError::not_found("Document", id))?;

        if state.documents.len() == 1 {
            tracing::debug!("[DocumentStore] Deleting last document {}; starting fresh", id);
            self.debouncer.cancel();
            state.pending = None;
            state.documents.clear();
            let replacement = state.push_new(self.inner.types.default_type());
            self.inner.persist(&state).await;
            drop(state);

            self.announce_selection(&replacement.id);
            return Ok(());
        }

        state.documents.remove(position);
        let was_selected = state.selected_id.as_deref() == Some(id);
        let mut reselected = None;
        if was_selected {
            self.debouncer.cancel();
            state.pending = None;
            if let Some(latest) = most_recent(&state.documents).cloned() {
                state.select(&latest);
                reselected = Some(latest.id);
            }
        }
        tracing::debug!(
            "[DocumentStore] Deleted {}; {} documents remain",
            id,
            state.documents.len()
        );
        self.inner.persist(&state).await;
        drop(state);

        if let Some(id) = reselected {
            self.announce_selection(&id);
        }
        Ok(())
    }

    /// Sets a document's title; blank titles become the default title.
    pub async fn rename_document(&self, id: &str, title: &str) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        state.find_mut(id)?.rename(title);
        self.inner.persist(&state).await;
        Ok(())
    }

    pub async fn retype_document(&self, id: &str, document_type: DocumentType) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        state.find_mut(id)?.document_type = document_type;
        self.inner.persist(&state).await;
        Ok(())
    }

    /// Moves the cursor and loads that document into the buffer.
    ///
    /// A pending commit for the previous selection is dropped.
    pub async fn select_document(&self, id: &str) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        let document = state
            .documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| CoWriterError::not_found("Document", id))?;

        self.debouncer.cancel();
        state.pending = None;
        state.select(&document);
        drop(state);

        self.announce_selection(id);
        Ok(())
    }

    /// Replaces the buffer and (re)schedules the debounced commit.
    pub async fn edit(&self, content: impl Into<String>) {
        let content = content.into();
        let mut state = self.inner.state.lock().await;
        state.buffer = content.clone();
        let Some(document_id) = state.selected_id.clone() else {
            return;
        };
        state.pending = Some(PendingEdit {
            document_id,
            content,
        });
        drop(state);

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        self.debouncer.schedule(async move {
            if let Some(inner) = inner.upgrade() {
                inner.commit_pending().await;
            }
        });
    }

    /// Commits a pending edit now. Returns true if one was committed.
    pub async fn flush(&self) -> bool {
        self.debouncer.cancel();
        self.inner.commit_pending().await
    }

    /// Drops a pending edit without committing it.
    pub async fn shutdown(&self) {
        if self.debouncer.cancel() {
            tracing::debug!("[DocumentStore] Discarding pending edit on shutdown");
        }
        self.inner.state.lock().await.pending = None;
    }

    fn announce_selection(&self, id: &str) {
        self.inner.bus.publish(SessionEvent::DocumentSelected { id: id.to_string() });
    }
}
