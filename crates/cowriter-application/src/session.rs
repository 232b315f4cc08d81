//! Session composition.
//!
//! `WriterSession` builds every store over one storage adapter, one backend
//! client and one event bus, and applies the rules that span stores: any
//! change to the edit buffer invalidates eval results, and an action result
//! replaces the buffer.

use std::sync::Arc;
use std::time::Duration;

use cowriter_core::config::UserConfig;
use cowriter_core::document::{Document, DocumentType};
use cowriter_core::error::Result;
use cowriter_core::event::EventBus;
use cowriter_core::llm::LlmConnection;
use cowriter_infrastructure::{
    KvConfigRepository, KvDocumentRepository, KvDocumentTypeRepository, StorageAdapter,
};
use cowriter_interaction::BackendClient;

use crate::chat_session::{ChatSession, SendOutcome};
use crate::config_store::ConfigStore;
use crate::connection::{ConnectError, ConnectionManager};
use crate::dispatch::{ActionContext, DispatchError, Dispatcher, EvalOutcome};
use crate::doc_type_store::DocumentTypeStore;
use crate::document_store::DocumentStore;

pub struct WriterSession {
    bus: EventBus,
    documents: DocumentStore,
    config: ConfigStore,
    doc_types: DocumentTypeStore,
    connection: Arc<ConnectionManager>,
    dispatcher: Dispatcher,
    chat: ChatSession,
}

impl WriterSession {
    /// Builds the session and hydrates every store from storage.
    pub async fn start(
        adapter: Arc<StorageAdapter>,
        client: Arc<dyn BackendClient>,
        autosave_delay: Duration,
    ) -> Self {
        let bus = EventBus::new();

        let doc_types = DocumentTypeStore::new(
            Arc::new(KvDocumentTypeRepository::new(adapter.clone())),
            bus.clone(),
        );
        doc_types.load().await;

        let config = ConfigStore::new(Arc::new(KvConfigRepository::new(adapter.clone())), bus.clone());
        config.load().await;

        let documents = DocumentStore::new(
            Arc::new(KvDocumentRepository::new(adapter)),
            doc_types.view(),
            bus.clone(),
            autosave_delay,
        );
        documents.initialize().await;

        let connection = Arc::new(ConnectionManager::new(client.clone()));
        let dispatcher = Dispatcher::new(client.clone(), connection.clone());
        let chat = ChatSession::new(client, connection.clone());

        tracing::info!("[WriterSession] Session started");
        Self {
            bus,
            documents,
            config,
            doc_types,
            connection,
            dispatcher,
            chat,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn doc_types(&self) -> &DocumentTypeStore {
        &self.doc_types
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn is_processing(&self) -> bool {
        self.dispatcher.is_processing()
    }

    pub async fn connect(
        &self,
        connection: LlmConnection,
    ) -> std::result::Result<Option<String>, ConnectError> {
        self.connection.connect(connection).await
    }

    /// Replaces the edit buffer with user input.
    pub async fn edit(&self, content: impl Into<String>) {
        self.documents.edit(content).await;
        self.config.invalidate_eval_results().await;
    }

    pub async fn new_document(&self) -> Document {
        let document = self.documents.new_document().await;
        self.config.invalidate_eval_results().await;
        document
    }

    pub async fn select_document(&self, id: &str) -> Result<()> {
        self.documents.select_document(id).await?;
        self.config.invalidate_eval_results().await;
        Ok(())
    }

    pub async fn delete_document(&self, id: &str) -> Result<()> {
        let before = self.documents.selected_id().await;
        self.documents.delete_document(id).await?;
        if self.documents.selected_id().await != before {
            self.config.invalidate_eval_results().await;
        }
        Ok(())
    }

    pub async fn rename_document(&self, id: &str, title: &str) -> Result<()> {
        self.documents.rename_document(id, title).await
    }

    pub async fn retype_document(&self, id: &str, document_type: DocumentType) -> Result<()> {
        self.documents.retype_document(id, document_type).await
    }

    /// Runs the action named or identified by `key` on the buffer.
    ///
    /// On success the buffer is replaced with the result, which is then
    /// committed like any other edit.
    pub async fn run_action(&self, key: &str) -> std::result::Result<String, DispatchError> {
        let config = self.config.snapshot().await;
        let action = config
            .find_action(key)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownItem {
                kind: "action",
                key: key.to_string(),
            })?;

        let context = self.action_context(&config).await;
        let text = self.dispatcher.run_action(&action, context).await?;
        self.edit(text.clone()).await;
        Ok(text)
    }

    /// Runs the eval named or identified by `key` and records its outcome.
    ///
    /// The outcome is returned but not recorded when the buffer changed while
    /// the request was in flight.
    pub async fn run_eval(&self, key: &str) -> std::result::Result<EvalOutcome, DispatchError> {
        let eval = self
            .config
            .snapshot()
            .await
            .find_eval(key)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownItem {
                kind: "eval",
                key: key.to_string(),
            })?;

        let buffer = self.documents.buffer().await;
        let outcome = self.dispatcher.run_eval(&eval, &buffer).await?;
        if self.documents.buffer().await != buffer {
            tracing::debug!(
                "[WriterSession] Buffer changed during eval {}; not recording outcome",
                eval.id
            );
            return Ok(outcome);
        }
        if let Err(e) = self
            .config
            .record_eval_result(&eval.id, outcome.score, outcome.result.clone())
            .await
        {
            // The eval was removed while the request was in flight.
            tracing::debug!("[WriterSession] Dropping eval outcome: {}", e);
        }
        Ok(outcome)
    }

    pub async fn send_chat(&self, message: &str) -> SendOutcome {
        let buffer = self.documents.buffer().await;
        self.chat.send(message, &buffer).await
    }

    /// Commits any pending edit. Call before the process exits.
    pub async fn close(&self) {
        self.documents.flush().await;
        tracing::info!("[WriterSession] Session closed");
    }

    async fn action_context(&self, config: &UserConfig) -> ActionContext {
        let document_type = self
            .documents
            .selected()
            .await
            .map(|d| d.document_type)
            .unwrap_or_default();
        ActionContext {
            text: self.documents.buffer().await,
            about_me: config.about_me.clone(),
            preferred_style: config.preferred_style,
            tone: config.tone,
            document_type,
        }
    }
}
