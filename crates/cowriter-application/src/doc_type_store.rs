//! Document-type allowlist store and its subscriber views.

use std::sync::Arc;
use tokio::sync::{RwLock, watch};

use cowriter_core::doc_types::{DocumentTypeAllowlist, DocumentTypeRepository, ToggleOutcome};
use cowriter_core::document::{Document, DocumentType};
use cowriter_core::event::{EventBus, SessionEvent};

/// Owns the allowlist, persists it and announces changes.
///
/// Changes go out on the bus as events and through a watch channel that
/// backs every [`DocumentTypeView`].
pub struct DocumentTypeStore {
    repository: Arc<dyn DocumentTypeRepository>,
    bus: EventBus,
    allowlist: RwLock<DocumentTypeAllowlist>,
    latest: watch::Sender<Vec<DocumentType>>,
}

impl DocumentTypeStore {
    /// Creates a store holding the default allowlist; call [`Self::load`]
    /// to hydrate it.
    pub fn new(repository: Arc<dyn DocumentTypeRepository>, bus: EventBus) -> Self {
        let allowlist = DocumentTypeAllowlist::default();
        let (latest, _) = watch::channel(allowlist.types().to_vec());
        Self {
            repository,
            bus,
            allowlist: RwLock::new(allowlist),
            latest,
        }
    }

    /// Loads the stored allowlist.
    ///
    /// A missing, empty or unreadable record is replaced by the full default
    /// list, which is written back.
    pub async fn load(&self) {
        let loaded = match self.repository.load().await {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("[DocumentTypeStore] Failed to load allowlist: {}", e);
                None
            }
        };

        let allowlist = match loaded {
            Some(allowlist) => allowlist,
            None => {
                let defaults = DocumentTypeAllowlist::default();
                tracing::debug!("[DocumentTypeStore] No stored allowlist; writing defaults");
                self.persist(&defaults).await;
                defaults
            }
        };

        self.latest.send_replace(allowlist.types().to_vec());
        *self.allowlist.write().await = allowlist;
    }

    pub async fn allowlist(&self) -> DocumentTypeAllowlist {
        self.allowlist.read().await.clone()
    }

    /// Adds or removes `document_type`.
    ///
    /// Removing the last member is refused without persisting or
    /// broadcasting.
    pub async fn toggle(&self, document_type: DocumentType) -> ToggleOutcome {
        let mut allowlist = self.allowlist.write().await;
        let outcome = allowlist.toggle(document_type);
        if outcome == ToggleOutcome::Refused {
            tracing::debug!(
                "[DocumentTypeStore] Refusing to remove last type {}",
                document_type
            );
            return outcome;
        }

        tracing::debug!(
            "[DocumentTypeStore] {:?} {} -> {:?}",
            outcome,
            document_type,
            allowlist.types()
        );
        self.persist(&allowlist).await;
        self.latest.send_replace(allowlist.types().to_vec());
        self.bus.publish(SessionEvent::DocumentTypesChanged {
            types: allowlist.types().to_vec(),
        });
        outcome
    }

    /// Types to offer when retyping `document`.
    pub async fn selectable_types_for(&self, document: &Document) -> Vec<DocumentType> {
        self.allowlist
            .read()
            .await
            .selectable_for(document.document_type)
    }

    /// A view that always reads the store's latest allowlist.
    pub fn view(&self) -> DocumentTypeView {
        DocumentTypeView::new(self.latest.subscribe())
    }

    async fn persist(&self, allowlist: &DocumentTypeAllowlist) {
        if let Err(e) = self.repository.save(allowlist).await {
            tracing::warn!("[DocumentTypeStore] Failed to persist allowlist: {}", e);
        }
    }
}

/// Read-only handle on the allowlist.
///
/// Backed by a watch channel, so a read always sees the most recent list no
/// matter how much other traffic the event bus carries.
#[derive(Clone)]
pub struct DocumentTypeView {
    receiver: watch::Receiver<Vec<DocumentType>>,
}

impl DocumentTypeView {
    pub fn new(receiver: watch::Receiver<Vec<DocumentType>>) -> Self {
        Self { receiver }
    }

    /// A view over a list that never changes.
    pub fn fixed(types: Vec<DocumentType>) -> Self {
        let (_, receiver) = watch::channel(types);
        Self { receiver }
    }

    pub fn types(&self) -> Vec<DocumentType> {
        self.receiver.borrow().clone()
    }

    /// Type for a newly created document: the first allowed type, or
    /// `Custom` when the list is empty.
    pub fn default_type(&self) -> DocumentType {
        self.receiver
            .borrow()
            .first()
            .copied()
            .unwrap_or(DocumentType::Custom)
    }
}
